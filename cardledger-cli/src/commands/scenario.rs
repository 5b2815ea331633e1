//! Scenario command - run the banking walkthrough

use std::rc::Rc;

use anyhow::Result;
use colored::Colorize;
use comfy_table::{Cell, Color};

use cardledger_core::adapters::MemoryInvoiceSink;
use cardledger_core::services::{InvoiceService, ScenarioReport, ScenarioService};

use super::get_context;
use crate::output;

pub fn run(seed: Option<u64>, dry_run: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;

    // Dry runs keep the invoice in memory
    let memory_sink = Rc::new(MemoryInvoiceSink::new());
    let dry_service;
    let service = if dry_run {
        let invoices = InvoiceService::new(Box::new(Rc::clone(&memory_sink)));
        dry_service = ScenarioService::new(ctx.config.clone(), invoices);
        &dry_service
    } else {
        &ctx.scenario_service
    };

    let report = match seed {
        Some(seed) => service.run_with_seed(seed)?,
        None => service.run()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, dry_run);

    if dry_run {
        for filename in memory_sink.filenames() {
            println!();
            output::info(&format!("Invoice {} (not written)", filename));
            if let Some(text) = memory_sink.get(&filename) {
                print!("{}", text);
            }
        }
    }

    Ok(())
}

fn print_report(report: &ScenarioReport, dry_run: bool) {
    println!("{}", "Banking Walkthrough".bold());
    println!("Seed: {}", report.seed);
    println!();
    println!("{}", report.customer);
    println!("{}", report.account);
    println!();

    let mut table = output::create_table();
    table.set_header(vec!["#", "Action", "Status", "Result"]);
    for (i, step) in report.steps.iter().enumerate() {
        let (status, detail) = if step.succeeded() {
            (
                Cell::new("OK").fg(Color::Green),
                step.outcome.data.clone().unwrap_or_default(),
            )
        } else {
            (
                Cell::new("FAILED").fg(Color::Red),
                step.outcome.error.clone().unwrap_or_default(),
            )
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&step.action),
            status,
            Cell::new(detail),
        ]);
    }
    println!("{}", table);
    println!();

    if let Some(card) = report.card() {
        println!("{}", "Credit Card".bold());
        println!("  {} {}", card.brand(), card.number());
        println!("  Expires: {}", card.expiration_date().format("%m/%Y"));
        println!("  Balance: {}", output::money(card.balance()));
        println!("  Remaining limit: {}", output::money(card.remaining_limit()));
        println!("  Purchases: {}", card.purchases().len());
        println!();
    }

    let failed = report.failed_steps();
    if failed > 0 {
        output::warning(&format!("{} of {} steps failed", failed, report.steps.len()));
    }
    match &report.invoice_path {
        Some(_) if dry_run => {}
        Some(path) => output::success(&format!("Invoice written to {}", path.display())),
        None if report.step("Print invoice").is_some() => {
            output::error("Invoice could not be written")
        }
        None => output::info("No invoice was printed"),
    }
}
