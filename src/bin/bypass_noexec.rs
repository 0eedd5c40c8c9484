use anyhow::Result;

fn main() -> Result<()> {
    hosts_studio_launcher::cli::run(hosts_studio_launcher::cli::LaunchMode::BypassNoexec)
}
