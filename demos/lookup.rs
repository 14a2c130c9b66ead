//! Host and DNS lookup demo.
//!
//! Usage: `cargo run --example lookup -- [name-or-address ...]`
//!
//! Set `RUST_LOG=hostnet=debug` to see resolver tracing.

use hostnet::dns::{literal, ResolutionOutcome};
use hostnet::host;
use hostnet::interface::adapters;
use hostnet::{AddressFamily, NetError, NetworkContext};

fn show(label: &str, outcome: &ResolutionOutcome) {
    match outcome {
        ResolutionOutcome::Found(value) => println!("  {label:<6} {value}"),
        ResolutionOutcome::NotFound => println!("  {label:<6} (none)"),
        ResolutionOutcome::Error(code) => println!("  {label:<6} error {code}"),
    }
}

#[tokio::main]
async fn main() -> Result<(), NetError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let ctx = NetworkContext::acquire()?;
    let resolver = ctx.resolver();

    let mut targets: Vec<String> = std::env::args().skip(1).collect();
    if targets.is_empty() {
        targets = vec!["example.com".into(), "8.8.8.8".into()];
    }

    for target in &targets {
        println!("{target}");
        let is_literal = literal(target, AddressFamily::Ipv4)
            .or_else(|| literal(target, AddressFamily::Ipv6))
            .is_some();
        if is_literal {
            show("PTR", &resolver.reverse(target).await?);
        } else {
            show("A", &resolver.lookup(target, AddressFamily::Ipv4).await?);
            show("AAAA", &resolver.lookup(target, AddressFamily::Ipv6).await?);
        }
    }

    println!("adapters");
    for family in [AddressFamily::Ipv4, AddressFamily::Ipv6] {
        for adapter in adapters(family) {
            println!(
                "  {:<24} {}",
                adapter.display_name(),
                adapter.address_strings().join(", ")
            );
        }
    }

    println!("host");
    println!("  name   {}", host::hostname()?);
    match host::local_ip().await {
        Ok(ip) => println!("  ip     {ip}"),
        Err(e) => println!("  ip     {e}"),
    }
    show("public", &host::public_ip(ctx.config()).await?);
    println!("  alive  {}", host::is_network_alive());

    Ok(())
}
