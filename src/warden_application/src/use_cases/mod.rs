pub mod admin;
pub mod change_password;
pub mod forgot_password;
pub mod login;
pub mod logout;
pub mod reset_password;
pub mod signup;
pub mod verify_email;
