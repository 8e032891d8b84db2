use env_logger::Env;

mod command;
mod record;
mod schema;
mod store;
mod tui;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    command::run()
}
