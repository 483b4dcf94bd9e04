use anyhow::Context;
use runml::{
    cmdline::RunCmd,
    config::Config,
    executor, normalizer, translate,
};
use structopt::StructOpt;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cmd = RunCmd::from_args();
    cmd.validate()?;

    let config = match &cmd.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let config = cmd.apply(config);

    let code = std::fs::read_to_string(&cmd.in_file)
        .with_context(|| format!("error opening file {}", cmd.in_file.display()))?;

    let src = translate(&code, &config.translate)
        .with_context(|| format!("could not translate {}", cmd.in_file.display()))?;

    if let Some(out) = &cmd.emit {
        std::fs::write(out, &src.0)
            .with_context(|| format!("error creating output file {}", out.display()))?;
        log::info!("wrote {}", out.display());
        return Ok(());
    }

    let stdout = executor::run(&src, &config.toolchain)?;
    if cmd.raw {
        print!("{}", stdout);
    } else {
        print!("{}", normalizer::normalize(&stdout));
    }

    Ok(())
}
