//! Auth command handlers: registration, logins, logout.

mod login;
mod logout;
mod membership_login;
mod register;

#[cfg(test)]
pub mod test_support;

pub use login::{LoginCommand, LoginHandler, LoginResult};
pub use logout::LogoutHandler;
pub use membership_login::{
    MembershipLoginCommand, MembershipLoginHandler, MembershipLoginResult,
};
pub use register::{RegisterCommand, RegisterHandler, RegisterResult};
