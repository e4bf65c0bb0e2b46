use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Restore the stored session and print it
    Status,

    /// Sign in to a community with a bearer token
    Login {
        /// Opaque bearer token issued by the identity service
        #[arg(long)]
        token: String,

        /// Community id
        #[arg(long)]
        tenant: String,
    },

    /// Clear the stored session and community context
    Logout,

    /// Select a community by id using its public metadata
    Tenant {
        /// Community id
        id: String,
    },
}
