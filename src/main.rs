use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tessel_blocks::FamilyRegistry;
use tessel_geom::{BlockPos, Side, Vec3};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tessel", version, about = "Inspect block families and resolve their variants")]
struct Cli {
    /// Log filter used when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every family in a definitions file
    List {
        defs: PathBuf,
        /// Also print each variant
        #[arg(short, long)]
        verbose: bool,
    },
    /// Resolve a block uri such as `core:fence.18`
    Lookup { defs: PathBuf, uri: String },
    /// Resolve the variant a placement would produce
    Place {
        defs: PathBuf,
        family: String,
        /// Direction from the supporting surface towards the new block
        #[arg(long, default_value = "top")]
        attach: Side,
        #[arg(long, value_parser = parse_vec3, default_value = "0,0,-1", allow_hyphen_values = true)]
        view: Vec3,
        /// Hit point relative to the cell centre
        #[arg(long, value_parser = parse_vec3, default_value = "0,0,0", allow_hyphen_values = true)]
        hit: Vec3,
        #[arg(long, value_parser = parse_pos, default_value = "0,0,0", allow_hyphen_values = true)]
        pos: BlockPos,
        /// Sides already occupied by blocks of the same family
        #[arg(long, value_delimiter = ',')]
        neighbors: Vec<Side>,
    },
    /// Resolve the connection variant for a set of connecting neighbors
    Connect {
        defs: PathBuf,
        family: String,
        #[arg(long, value_delimiter = ',')]
        neighbors: Vec<Side>,
        /// Block placed on the neighbor sides; the family's archetype by default
        #[arg(long)]
        with: Option<String>,
    },
}

fn parse_triple<T: std::str::FromStr>(s: &str) -> Result<[T; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [a, b, c] = parts.as_slice() else {
        return Err(format!("expected three comma-separated values, got `{}`", s));
    };
    let p = |v: &str| v.parse::<T>().map_err(|_| format!("bad component `{}`", v));
    Ok([p(*a)?, p(*b)?, p(*c)?])
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let [x, y, z] = parse_triple::<f32>(s)?;
    Ok(Vec3::new(x, y, z))
}

fn parse_pos(s: &str) -> Result<BlockPos, String> {
    let [x, y, z] = parse_triple::<i32>(s)?;
    Ok(BlockPos::new(x, y, z))
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let out = match cli.command {
        Command::List { defs, verbose } => {
            let reg = FamilyRegistry::load_from_path(&defs)?;
            commands::list(&reg, verbose)?
        }
        Command::Lookup { defs, uri } => {
            let reg = FamilyRegistry::load_from_path(&defs)?;
            commands::lookup(&reg, &uri)?
        }
        Command::Place {
            defs,
            family,
            attach,
            view,
            hit,
            pos,
            neighbors,
        } => {
            let reg = FamilyRegistry::load_from_path(&defs)?;
            let data = commands::placement_data(pos, attach, view, hit);
            commands::place(&reg, &family, &data, &neighbors)?
        }
        Command::Connect {
            defs,
            family,
            neighbors,
            with,
        } => {
            let reg = FamilyRegistry::load_from_path(&defs)?;
            commands::connect(&reg, &family, &neighbors, with.as_deref())?
        }
    };
    print!("{}", out);
    if !out.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .parse_filters(&cli.log_level)
        .parse_default_env()
        .init();
    if let Err(e) = run(cli) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_place_arguments() {
        let cli = Cli::try_parse_from([
            "tessel",
            "place",
            "defs.toml",
            "core:chest",
            "--attach",
            "LEFT",
            "--view",
            "1,0,-0.5",
            "--neighbors",
            "left,back",
        ])
        .unwrap();
        match cli.command {
            Command::Place {
                attach,
                view,
                neighbors,
                pos,
                ..
            } => {
                assert_eq!(attach, Side::Left);
                assert_eq!(view, Vec3::new(1.0, 0.0, -0.5));
                assert_eq!(neighbors, vec![Side::Left, Side::Back]);
                assert_eq!(pos, BlockPos::new(0, 0, 0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn triples_need_three_parts() {
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_pos("1,2,x").is_err());
        assert_eq!(parse_pos("-1, 2, 3"), Ok(BlockPos::new(-1, 2, 3)));
    }
}
