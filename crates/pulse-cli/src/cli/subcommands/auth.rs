use clap::{Args, Subcommand};

/// Account and session subcommands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Create a new account and sign in.
    Signup(CredentialArgs),
    /// Sign in with an existing account.
    Login(CredentialArgs),
    /// Clear the stored session.
    Logout,
    /// Send a password reset email.
    Reset(ResetArgs),
    /// Show the current session state.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct CredentialArgs {
    /// Account email address.
    #[arg(long)]
    pub email: String,

    /// Account password.
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct ResetArgs {
    /// Email address to send the reset link to.
    #[arg(long)]
    pub email: String,
}
