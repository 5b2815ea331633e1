//! Hello command - render the greeting view

use anyhow::Result;
use colored::Colorize;

use cardledger_core::services::GreetingService;

use super::get_context;

pub fn run(name: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let view = ctx.greeting_service.hello(name);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{} {}", "GET".dimmed(), GreetingService::route(name));
    println!("View: {}", view.view);
    println!("Hello, {}!", view.name.bold());
    println!("{}", view.injected.italic());

    Ok(())
}
