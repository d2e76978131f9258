use secrecy::Secret;

use warden_core::{NewUser, PasswordHasher, Profile, Role, UserStore, UserStoreError};

pub const SUPER_ADMIN_USERNAME: &str = "superadmin";

/// Creates the initial super admin account when none exists yet, so a fresh
/// deployment has a principal able to mint the rest.
pub async fn seed_super_admin<U, H>(
    users: &U,
    hasher: &H,
    password: &Secret<String>,
) -> Result<(), UserStoreError>
where
    U: UserStore,
    H: PasswordHasher,
{
    if users
        .find_by_username(SUPER_ADMIN_USERNAME)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password_hash = hasher
        .hash(password)
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

    users
        .insert(NewUser {
            username: SUPER_ADMIN_USERNAME.to_owned(),
            password_hash,
            profile: Profile {
                first_name: "Super".to_owned(),
                last_name: "Admin".to_owned(),
                email: "superadmin@example.com".to_owned(),
                phone_number: "0000000000".to_owned(),
                address: "System Administrator".to_owned(),
            },
            active: true,
            email_verified: true,
            role: Role::SuperAdmin,
        })
        .await?;

    tracing::info!(username = SUPER_ADMIN_USERNAME, "super admin user created");
    tracing::warn!("IMPORTANT: change the default super admin password in production");
    Ok(())
}
