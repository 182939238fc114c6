//! Mint a signed bearer token for the campus API
//!
//! Useful for local testing and for wiring up clients before a full
//! identity provider is in place:
//!
//! ```text
//! campus-token --user-id 42 --email dev@example.com --secret my-secret
//! ```

use anyhow::{bail, Result};
use clap::Parser;

use campus_auth::TokenCodec;

/// Mint a signed bearer token for the campus API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// User ID to embed in the token (must be positive)
    #[arg(long)]
    user_id: i64,

    /// Optional email to embed in the token
    #[arg(long)]
    email: Option<String>,

    /// Signing secret, must match the server's [auth].jwt_secret
    #[arg(long, env = "CAMPUS_JWT_SECRET", default_value = "change-me-in-production")]
    secret: String,

    /// Signing algorithm (HS256, HS384 or HS512)
    #[arg(long, default_value = "HS256")]
    algorithm: String,

    /// Token lifetime in minutes
    #[arg(long, default_value_t = 30)]
    ttl_minutes: i64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.user_id <= 0 {
        bail!("user-id must be positive, got {}", args.user_id);
    }

    let codec = TokenCodec::new(&args.secret, &args.algorithm, args.ttl_minutes)?;
    let token = codec.issue(args.user_id, args.email.as_deref())?;

    println!("{}", token);
    Ok(())
}
