use clap::{ArgAction, Parser};
use shared::{Error, LookupConfig, Mode, Provider, Schema};
use std::{
    io::{self, Write},
    time::Duration,
};

mod lookup;
mod render;
mod util;

use lookup::NetResolver;
use render::Format;

#[derive(Clone, Debug, Parser)]
#[command(name = "ipreport", author, version, about)]
struct Opts {
    /// Display results in JSON format
    #[clap(long)]
    json: bool,

    /// Also display what the lookup service knows about the public IP
    /// (country, city, region, location, network operator, hostname)
    #[clap(long)]
    rich: bool,

    /// Lookup service to ask for the public IP: ipinfo, ifconfig or ipify
    #[clap(long, default_value = "ipinfo")]
    provider: Schema,

    /// HTTP request timeout, in seconds
    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Verbose output, use -vv for even higher verbositude
    #[clap(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Opts {
    fn lookup_config(&self) -> LookupConfig {
        LookupConfig {
            provider: Provider::new(self.provider),
            mode: if self.rich { Mode::Rich } else { Mode::Plain },
            timeout: Duration::from_secs(self.timeout),
            ..Default::default()
        }
    }

    fn format(&self) -> Format {
        if self.json {
            Format::Json
        } else {
            Format::Text
        }
    }
}

fn main() {
    let opts = Opts::parse();
    util::init_logger(opts.verbose);

    if let Err(e) = run(&opts) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(opts: &Opts) -> Result<(), Error> {
    let config = opts.lookup_config();
    log::debug!(
        "looking up public IP via {} ({:?} mode), private IP via {}",
        config.provider.base_url(),
        config.mode,
        config.probe
    );
    let result = lookup::resolve_all(&NetResolver::new(config));

    let mut stdout = io::stdout().lock();
    render::render(&result, opts.format(), opts.rich, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Opts::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let opts = Opts::try_parse_from(["ipreport"]).unwrap();
        assert_eq!(opts.format(), Format::Text);
        assert_eq!(opts.lookup_config(), LookupConfig::default());
    }

    #[test]
    fn test_rich_json() {
        let opts = Opts::try_parse_from(["ipreport", "--rich", "--json"]).unwrap();
        let config = opts.lookup_config();
        assert_eq!(opts.format(), Format::Json);
        assert_eq!(config.mode, Mode::Rich);
        assert_eq!(config.provider, Provider::new(Schema::IpInfo));
    }

    #[test]
    fn test_provider_and_timeout() {
        let opts =
            Opts::try_parse_from(["ipreport", "--provider", "ifconfig", "--timeout", "3", "-vv"])
                .unwrap();
        let config = opts.lookup_config();
        assert_eq!(config.provider.json_url(), "https://ifconfig.me/all.json");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(opts.verbose, 2);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Opts::try_parse_from(["ipreport", "--provider", "ipapi"]).is_err());
        assert!(Opts::try_parse_from(["ipreport", "--timeout", "0"]).is_err());
    }
}
