use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Error;
use clap::{Args, Parser};

use tglogin_config::Config;
use tglogin_core::{
    canonical::{canonical_entries, LoginField},
    payload::{parse_json_fields, parse_query_fields, IdentityPayload},
    sign::compute_login_hash,
    verify::verify_login_with_key,
};

/// Source of login data
#[derive(Args)]
pub struct LoginDataArgs {
    /// Query string of the login widget redirect
    #[arg(long, conflicts_with = "json")]
    query: Option<String>,
    /// JSON file with login data ('-' to read from stdin)
    #[arg(long)]
    json: Option<PathBuf>,
}

fn read_json(path: &Path) -> Result<String, Error> {
    let value = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(value)
}

impl LoginDataArgs {
    fn read_fields(&self) -> Result<HashMap<String, String>, Error> {
        let fields = if let Some(ref query) = self.query {
            parse_query_fields(query)?
        } else if let Some(ref path) = self.json {
            parse_json_fields(&read_json(path)?)?
        } else {
            return Err(Error::msg("either --query or --json must be provided"));
        };
        Ok(fields)
    }

    fn read_payload(&self) -> Result<IdentityPayload, Error> {
        let fields = self.read_fields()?;
        let payload = IdentityPayload::from_fields(&fields)?;
        Ok(payload)
    }

    // Signature is not required
    fn read_unsigned_payload(&self) -> Result<IdentityPayload, Error> {
        let mut fields = self.read_fields()?;
        fields.entry(LoginField::Hash.key().to_string()).or_default();
        let payload = IdentityPayload::from_fields(&fields)?;
        Ok(payload)
    }
}

/// Verify login data signature
#[derive(Parser)]
pub struct Verify {
    #[command(flatten)]
    login_data: LoginDataArgs,
}

impl Verify {
    /// Prints "valid" or "invalid".
    /// Returns false if signature doesn't match login data.
    pub fn execute(
        &self,
        config: &Config,
        output: &mut impl Write,
    ) -> Result<bool, Error> {
        let payload = self.login_data.read_payload()?;
        let is_valid = verify_login_with_key(&payload, &config.signing_key())?;
        if is_valid {
            log::info!(
                "login data verified (id = {}, auth_date = {:?})",
                payload.telegram_id,
                payload.issued_at(),
            );
            writeln!(output, "valid")?;
        } else {
            log::warn!("invalid login data signature (id = {})", payload.telegram_id);
            writeln!(output, "invalid")?;
        };
        Ok(is_valid)
    }
}

/// Print data-check string
#[derive(Parser)]
pub struct Canonicalize {
    #[command(flatten)]
    login_data: LoginDataArgs,
}

impl Canonicalize {
    pub fn execute(&self, output: &mut impl Write) -> Result<(), Error> {
        let payload = self.login_data.read_unsigned_payload()?;
        for entry in canonical_entries(&payload) {
            writeln!(output, "{entry}")?;
        };
        Ok(())
    }
}

/// Create login data signature (for testing)
#[derive(Parser)]
pub struct Sign {
    #[command(flatten)]
    login_data: LoginDataArgs,
}

impl Sign {
    pub fn execute(
        &self,
        config: &Config,
        output: &mut impl Write,
    ) -> Result<(), Error> {
        let payload = self.login_data.read_unsigned_payload()?;
        let hash = compute_login_hash(&payload, &config.signing_key())?;
        writeln!(output, "{hash}")?;
        Ok(())
    }
}
