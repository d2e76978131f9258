pub mod publisher;
pub mod use_cases;
pub mod verification;

pub use publisher::{EventPublishError, EventPublisher, EventTopics, PublishError};
pub use use_cases::{
    admin::{
        AdminActionError, ChangeRoleData, ChangeUserRoleUseCase, CreateManagedUserUseCase,
        ManagedUserData,
    },
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    forgot_password::{ForgotPasswordError, ForgotPasswordUseCase},
    login::{LoginError, LoginSuccess, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    signup::{SignUpData, SignUpError, SignUpUseCase},
    verify_email::{VerifyEmailError, VerifyEmailUseCase},
};
pub use verification::VerificationTokens;

#[cfg(test)]
pub(crate) mod testing;
