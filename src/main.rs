use std::{
    io::Write,
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use clap::{Parser, Subcommand};
use mcstatus::{IconSet, NetClient, ProbeConf, StatusErr, StatusService, Target};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(long, default_value = "./icons", help = "Directory holding default.png and bedrock.png")]
    icons: PathBuf,

    #[arg(long, help = "Overall budget in seconds shared by all attempts of a probe")]
    deadline: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the server status as JSON
    Status(TargetArgs),
    /// Write the server icon as PNG
    Icon {
        #[command(flatten)]
        target: TargetArgs,

        #[arg(long, short, help = "Output file, stdout when absent")]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct TargetArgs {
    /// Server address, host or host:port
    address: String,

    #[arg(long, short)]
    port: Option<String>,

    #[arg(long)]
    query_port: Option<String>,

    #[arg(long, help = "Treat the target as a Bedrock server")]
    bedrock: Option<String>,
}

impl TargetArgs {
    fn resolve(&self) -> Result<Target, StatusErr> {
        Target::resolve(
            &self.address,
            self.port.as_deref(),
            self.bedrock.as_deref(),
            self.query_port.as_deref(),
        )
    }
}

fn found_code(found: bool) -> ExitCode {
    if found {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run(args: Args) -> Result<ExitCode, StatusErr> {
    // Without usable default icons no request can be answered.
    let icons = IconSet::load(&args.icons)?;
    let conf = ProbeConf {
        deadline: args.deadline.map(Duration::from_secs),
        ..ProbeConf::default()
    };
    let service = StatusService::create(NetClient::default(), icons, conf);

    match args.command {
        Command::Status(target) => {
            let status = service.get_status(&target.resolve()?);

            println!("{}", status.result);
            Ok(found_code(status.found))
        }
        Command::Icon { target, output } => {
            let reply = service.get_icon(&target.resolve()?);

            match output {
                Some(path) => std::fs::write(path, reply.icon.png())?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(reply.icon.png())?;
                    stdout.flush()?;
                }
            }

            Ok(found_code(reply.found))
        }
    }
}

fn main() -> Result<ExitCode, StatusErr> {
    env_logger::init();

    run(Args::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcstatus::Family;

    #[test]
    fn bedrock_flag_selects_family() {
        let args = Args::try_parse_from([
            "mcstatus",
            "status",
            "play.example.com",
            "--bedrock",
            "true",
            "--query-port",
            "19133",
        ])
        .unwrap();

        let target = match args.command {
            Command::Status(target) => target.resolve().unwrap(),
            Command::Icon { .. } => unreachable!(),
        };

        assert_eq!(target.family, Family::Bedrock);
        assert_eq!(target.port, 19132);
        assert_eq!(target.query_port, 19133);
    }

    #[test]
    fn icon_command_flags() {
        let args = Args::try_parse_from([
            "mcstatus",
            "--deadline",
            "3",
            "icon",
            "play.example.com:25570",
            "-o",
            "out.png",
        ])
        .unwrap();

        assert_eq!(args.deadline, Some(3));

        match args.command {
            Command::Icon { target, output } => {
                assert_eq!(target.resolve().unwrap().port, 25570);
                assert_eq!(output, Some(PathBuf::from("out.png")));
            }
            Command::Status(_) => unreachable!(),
        }
    }
}
