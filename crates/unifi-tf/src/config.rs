//! Flag overrides on top of the layered provider configuration.

use unifi_tf_config::Config;
use unifi_tf_core::ProviderConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load config file and environment, then apply CLI flags.
pub fn provider_config(global: &GlobalOpts) -> Result<ProviderConfig, CliError> {
    let mut cfg = unifi_tf_config::load_config()?;
    apply_overrides(&mut cfg, global);
    Ok(cfg.to_provider_config()?)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(ref url) = global.url {
        cfg.url = Some(url.clone());
    }
    if let Some(ref site) = global.site {
        cfg.site.clone_from(site);
    }
    if let Some(ref username) = global.username {
        cfg.username = Some(username.clone());
    }
    if let Some(ref password) = global.password {
        cfg.password = Some(password.clone());
    }
    if let Some(ref key) = global.api_key {
        cfg.api_key = Some(key.clone());
    }
    if global.insecure {
        cfg.insecure = true;
    }
    if let Some(ref ca) = global.ca_cert {
        cfg.ca_cert = Some(ca.clone());
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["unifi-tf"];
        argv.extend_from_slice(args);
        argv.push("kinds");
        Cli::try_parse_from(argv).unwrap().global
    }

    #[test]
    fn flags_override_loaded_values() {
        let mut cfg = Config {
            url: Some("https://old.example".into()),
            username: Some("admin".into()),
            ..Config::default()
        };
        apply_overrides(
            &mut cfg,
            &global(&["--url", "https://10.0.0.1", "--site", "lab", "--timeout", "5"]),
        );

        assert_eq!(cfg.url.as_deref(), Some("https://10.0.0.1"));
        assert_eq!(cfg.site, "lab");
        assert_eq!(cfg.timeout, 5);
        assert_eq!(cfg.username.as_deref(), Some("admin"));
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let mut cfg = Config {
            api_key: Some("from-file".into()),
            timeout: 12,
            ..Config::default()
        };
        let before = cfg.clone();
        apply_overrides(&mut cfg, &global(&[]));
        assert_eq!(cfg, before);
    }
}
