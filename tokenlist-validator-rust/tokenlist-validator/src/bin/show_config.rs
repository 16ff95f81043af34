use tokenlist_core::ChainId;
use tokenlist_validator::infrastructure::config::ValidatorConfig;

fn main() {
    let config = match ValidatorConfig::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    };

    println!("Token List Validator Configuration:\n");
    println!("  Data directory: {}", config.datadir.display());
    println!("  Privileged chain: {}", config.privileged_chain);
    println!("  External list URL: {}", config.external_list_url);
    println!("  RPC timeout: {}s", config.rpc_timeout_secs);
    println!("  Concurrency: {}", config.concurrency);
    println!("  Log level: {}", config.log_level);
    println!(
        "  Log directory: {}",
        config.log_directory.as_deref().unwrap_or("(not set)")
    );
    println!("\n  RPC URLs:");
    for chain in ChainId::ALL {
        println!(
            "    {:<17} ({:>8}) {}",
            chain.as_str(),
            chain.chain_id(),
            config.rpc_url(chain).unwrap_or("(not set)")
        );
    }
}
