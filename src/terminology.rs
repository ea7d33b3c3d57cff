/// Friendly display name of a step kind, e.g. `user_profile` -> "User Details".
///
/// Kinds outside the known vocabulary fall back to their tag with underscores
/// replaced by spaces.
pub fn friendly_name(kind: &str) -> String {
    let known = match kind {
        "identify" => "Identification",
        "authenticate" => "Authentication",
        "verify" => "Verification",
        "user_profile" => "User Details",
        "create_authenticator" => "Security Setup",
        "select_destination" => "Delivery Choice",
        "verify_account_recovery_code" => "Recovery Verify",
        "reset_password" => "Password Reset",
        "prompt_create_passkey" => "Passkey Offer",
        "recovery_code" => "Recovery Codes",
        "change_password" => "Update Password",
        other => return other.replace('_', " "),
    };
    known.to_string()
}

/// One-line description of what a step kind asks of the user, where one exists.
pub fn describe(kind: &str) -> Option<&'static str> {
    match kind {
        "identify" => Some("Ask the user for their email, phone, or username."),
        "authenticate" => Some("Verify the user with a password, OTP, or passkey."),
        "verify" => Some("Ensure the user owns the email or phone provided."),
        "user_profile" => Some("Collect additional information like name or birthdate."),
        "create_authenticator" => Some("Enroll the user in a new security method."),
        "select_destination" => Some("Let the user choose where to receive their login code."),
        _ => None,
    }
}
