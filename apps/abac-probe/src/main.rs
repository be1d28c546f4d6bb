//! Ask the PDP for one access decision and print the outcome.
//!
//! ```text
//! ABAC_PDP_USERNAME=srvfpsak ABAC_PDP_PASSWORD=... ABAC_PROBE_TOKEN=eyJ... \
//!   abac-probe --domain foreldrepenger --resource-type fagsak --action read \
//!   --person 12345678910
//! ```
//!
//! Exits with status 0 when access is granted, 1 when denied and 2 when the
//! PDP could not be asked.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use abac_sdk::{EnforcerError, IdToken, PdpRequest, PolicyEnforcer, StandardRequestAttributes};
use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use pdp_client::{PdpClientConfig, PdpClientModule};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TokenKindArg {
    Oidc,
    Tokenx,
    Saml,
}

/// ABAC probe - ask the policy decision point for one access decision.
#[derive(Parser, Debug)]
#[command(name = "abac-probe", version)]
struct Args {
    /// YAML file with PDP client settings; `ABAC_PDP_*` variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Identity token of the caller
    #[arg(long, env = "ABAC_PROBE_TOKEN", hide_env_values = true)]
    token: String,

    #[arg(long, value_enum, default_value_t = TokenKindArg::Oidc)]
    token_kind: TokenKindArg,

    #[arg(long)]
    domain: String,

    #[arg(long)]
    resource_type: String,

    #[arg(long)]
    action: String,

    /// Subject id (for example the employee ident)
    #[arg(long)]
    subject: Option<String>,

    /// Person id; repeat for several persons
    #[arg(long = "person")]
    persons: Vec<String>,

    /// Extra resource attribute as `id=value`; repeatable
    #[arg(long = "resource-attribute", value_name = "ID=VALUE")]
    resource_attributes: Vec<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Args {
    fn id_token(&self) -> IdToken {
        match self.token_kind {
            TokenKindArg::Oidc => IdToken::oidc(self.token.clone()),
            TokenKindArg::Tokenx => IdToken::tokenx(self.token.clone()),
            TokenKindArg::Saml => IdToken::saml(self.token.clone()),
        }
    }

    fn pdp_request(&self) -> anyhow::Result<PdpRequest> {
        let mut builder = PdpRequest::builder(
            self.id_token(),
            self.domain.as_str(),
            self.resource_type.as_str(),
            self.action.as_str(),
        )
        .person_ids(self.persons.iter().map(String::as_str));

        if let Some(subject) = &self.subject {
            builder = builder.subject_id(subject.as_str());
        }
        for raw in &self.resource_attributes {
            let Some((id, value)) = raw.split_once('=') else {
                bail!("resource attribute '{raw}' is not of the form ID=VALUE");
            };
            builder = builder.resource_attribute(id, value);
        }
        Ok(builder.build())
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let request = args.pdp_request()?;
    let cfg = PdpClientConfig::load(args.config.as_deref())
        .context("failed to load PDP client configuration")?;
    let pdp = PdpClientModule::init(&cfg, Arc::new(StandardRequestAttributes))
        .context("failed to initialize PDP client")?;

    match PolicyEnforcer::new(pdp).enforce(request).await {
        Ok(decision) => {
            println!("{}", decision.outcome());
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let code = match &err {
                EnforcerError::Denied { outcome, .. } => {
                    println!("{outcome}");
                    ExitCode::from(1)
                }
                EnforcerError::EvaluationFailed(_) => ExitCode::from(2),
            };
            err.into_platform_error().log();
            Ok(code)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.json_logs);

    match run(&args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = ?e, "abac-probe failed");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use abac_sdk::TokenKind;
    use figment::Jail;

    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec![
            "abac-probe",
            "--token",
            "<saml/>",
            "--domain",
            "foreldrepenger",
            "--resource-type",
            "fagsak",
            "--action",
            "read",
        ];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn builds_request_from_arguments() {
        let args = parse(&[
            "--token-kind",
            "saml",
            "--subject",
            "Z999999",
            "--person",
            "12345678910",
            "--person",
            "10987654321",
            "--resource-attribute",
            "aksjonspunkt=5016",
        ]);
        let request = args.pdp_request().unwrap();

        assert_eq!(request.id_token().kind(), TokenKind::Saml);
        assert_eq!(request.subject_id(), Some("Z999999"));
        assert_eq!(request.person_ids().len(), 2);
        assert_eq!(
            request.extra_resource_attributes().get("aksjonspunkt"),
            Some(&vec!["5016".to_owned()])
        );
    }

    #[test]
    fn malformed_resource_attribute_is_rejected() {
        let args = parse(&["--resource-attribute", "no-separator"]);
        assert!(args.pdp_request().is_err());
    }

    #[test]
    fn token_kind_defaults_to_oidc() {
        assert_eq!(parse(&[]).id_token().kind(), TokenKind::Oidc);
    }

    #[test]
    fn config_file_is_read() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "pdp.yaml",
                "endpoint_url: http://localhost:9/authorize\nusername: srvfpsak\npep_id: fpsak\n",
            )?;

            let cfg = PdpClientConfig::load(Some(std::path::Path::new("pdp.yaml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.endpoint_url, "http://localhost:9/authorize");
            assert_eq!(cfg.username, "srvfpsak");
            assert_eq!(cfg.pep_id, "fpsak");
            Ok(())
        });
    }
}
