use anyhow::Result;
use clap::Parser;
use csv::WriterBuilder;
use log::info;
use mushr_core::{Env as _, TimeLimit};
use mushr_mujoco_gym::{
    EnvRegistry, MujocoSim, MushrAct, MushrBlockEnv, ObsMode, RenderMode, ZeroCost,
};
use std::fs::File;

type Env = TimeLimit<MushrBlockEnv<MujocoSim, ZeroCost>>;

/// Drive the cars with uniformly random actions
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Environment id
    #[arg(long, default_value = "MushrBlock-v0")]
    env: String,

    /// Number of episodes
    #[arg(short, long, default_value_t = 3)]
    n_episodes: usize,

    /// Maximum number of steps in an episode
    #[arg(long, default_value_t = 200)]
    max_steps: usize,

    /// Use the planar observation layout
    #[arg(long, default_value_t = false)]
    planar: bool,

    /// Open the viewer
    #[arg(short, long, default_value_t = false)]
    render: bool,

    /// Write observations to this CSV file
    #[arg(long)]
    csv: Option<String>,
}

fn build_env(args: &Args) -> Result<Env> {
    let mut config = EnvRegistry::new().config::<ZeroCost>(&args.env)?;
    config.max_episode_steps = args.max_steps;
    if args.planar {
        config.env_config = config.env_config.obs_mode(ObsMode::Planar);
    }
    if args.render {
        config.env_config = config.env_config.render_mode(Some(RenderMode::Human));
    }
    Env::build(&config, 42)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    fastrand::seed(42);

    let args = Args::parse();
    let mut env = build_env(&args)?;
    let action_space = env.inner().action_space().clone();

    // Rows are `episode, step, obs...` without a header.
    let mut wtr = match &args.csv {
        Some(path) => Some(WriterBuilder::new().has_headers(false).from_writer(File::create(path)?)),
        None => None,
    };

    for episode in 0..args.n_episodes {
        let mut obs = env.reset()?;
        let mut n_steps = 0;

        loop {
            if let Some(wtr) = wtr.as_mut() {
                let mut row = vec![episode.to_string(), n_steps.to_string()];
                row.extend(obs.obs.iter().map(|x| x.to_string()));
                wtr.write_record(&row)?;
            }

            let act = MushrAct::from(action_space.sample()?);
            let (step, _) = env.step(&act)?;
            n_steps += 1;
            let done = step.is_done();
            obs = step.obs;
            if done {
                break;
            }
        }

        info!(
            "Episode {}: {} steps, block at ({:.3}, {:.3})",
            episode, n_steps, obs.obs[0], obs.obs[1]
        );
    }

    if let Some(mut wtr) = wtr {
        wtr.flush()?;
    }

    Ok(())
}
