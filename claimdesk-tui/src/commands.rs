// File: claimdesk-tui/src/commands.rs

use colored::Colorize;

use claimdesk_core::capture::CapturedCode;
use claimdesk_core::history::HistoryBrowser;
use claimdesk_core::models::{HistoryPage, RedemptionDetails, VerifiedClaim};
use claimdesk_core::{RedemptionSession, SessionPhase};

/// Handle one console line. Returns true when the operator wants to quit.
pub async fn dispatch(
    line: &str,
    session: &mut RedemptionSession,
    browser: &mut HistoryBrowser,
) -> bool {
    let mut parts = line.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_lowercase();
    let rest = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "help" => print_help(),
        "status" => print_status(session),
        "verify" => verify(session, rest).await,
        "redeem" => redeem(session, rest).await,
        "reset" | "cancel" => {
            session.reset();
            println!("Back to idle.");
        }
        "history" => {
            let page = rest.parse::<u32>().ok();
            history(browser, page).await;
        }
        "next" => match browser.next_page().await {
            Ok(page) => print_history_page(page),
            Err(e) => println!("{} {e}", "❌".red()),
        },
        "prev" => match browser.prev_page().await {
            Ok(page) => print_history_page(page),
            Err(e) => println!("{} {e}", "❌".red()),
        },
        "stats" => {
            let days = rest.parse::<u32>().unwrap_or(30);
            stats(browser, days).await;
        }
        "quit" | "exit" => return true,
        _ => println!("Unknown command '{cmd}'. Type 'help' for commands."),
    }
    false
}

fn print_help() {
    println!("Commands:");
    println!("  verify <claim-id>   verify a claim the customer presents");
    println!("  redeem [notes...]   complete the verified claim (optional notes)");
    println!("  reset               abandon the current claim, back to idle");
    println!("  status              show the current workflow state");
    println!("  history [page]      show redemption history");
    println!("  next / prev         page through history");
    println!("  stats [days]        redemption stats (default 30 days)");
    println!("  quit                leave the console");
}

fn print_status(session: &RedemptionSession) {
    println!("Workflow state: {}", session.phase().name().bold());
    match session.phase() {
        SessionPhase::Verified(claim) => print_claim(claim),
        SessionPhase::Completed(details) => print_completion(details),
        _ => {}
    }
    if let Some(err) = session.last_error() {
        println!("{} {}", "Last error:".red(), err.message);
        if err.requires_reauth {
            println!("{}", "Please sign in again before continuing.".yellow());
        }
    }
}

async fn verify(session: &mut RedemptionSession, input: &str) {
    let code = match CapturedCode::typed(input) {
        Ok(code) => code,
        Err(e) => {
            println!("{} {e}", "❌".red());
            return;
        }
    };

    println!("Verifying claim {}...", code.text);
    if let Err(e) = session.verify(&code).await {
        println!("{} {e}", "❌".red());
        return;
    }
    match session.phase() {
        SessionPhase::Verified(claim) => {
            println!("{} Claim verified - ready to redeem", "✅".green());
            print_claim(claim);
            println!("Type 'redeem [notes]' to complete, or 'reset' to cancel.");
        }
        _ => {
            if let Some(err) = session.last_error() {
                println!("{} {}", "❌".red(), err.message);
            }
        }
    }
}

async fn redeem(session: &mut RedemptionSession, notes: &str) {
    let notes = if notes.is_empty() { None } else { Some(notes) };
    if let Err(e) = session.complete(notes).await {
        println!("{} {e}", "❌".red());
        return;
    }
    match session.phase() {
        SessionPhase::Completed(details) => {
            println!("{} Redemption successful!", "🎉".green());
            print_completion(details);
            println!("Type 'reset' to start the next redemption.");
        }
        SessionPhase::Verified(_) => {
            if let Some(err) = session.last_error() {
                println!("{} {}", "❌".red(), err.message);
                println!("The claim is still verified; you may retry with 'redeem'.");
            }
        }
        _ => {
            if let Some(err) = session.last_error() {
                println!("{} {}", "❌".red(), err.message);
                println!("This claim can no longer be redeemed; back to idle.");
            }
        }
    }
}

async fn history(browser: &mut HistoryBrowser, page: Option<u32>) {
    let result = match page {
        Some(p) => browser.load_page(p).await,
        None => browser.load().await,
    };
    match result {
        Ok(page) => print_history_page(page),
        Err(e) => println!("{} {e}", "❌".red()),
    }
}

async fn stats(browser: &HistoryBrowser, days: u32) {
    match browser.stats(days).await {
        Ok(stats) => {
            println!("Redemption stats, last {} days:", stats.period_days);
            println!("  claims:       {}", stats.total_claims);
            println!("  redeemed:     {}", stats.total_redemptions);
            println!("  pending:      {}", stats.pending_redemptions);
            println!("  rate:         {:.1}%", stats.redemption_rate);
            println!("  savings:      ${:.2}", stats.total_savings_provided);
            println!(
                "  claim types:  {} in-store / {} online",
                stats.claim_types.in_store, stats.claim_types.online
            );
            for day in &stats.daily_breakdown {
                println!(
                    "    {}  claims {:>3}  redemptions {:>3}",
                    day.date, day.claims, day.redemptions
                );
            }
        }
        Err(e) => println!("{} {e}", "❌".red()),
    }
}

fn print_claim(claim: &VerifiedClaim) {
    println!("  Customer: {}", claim.customer.name.bold());
    if let Some(email) = &claim.customer.email {
        println!("  Email:    {email}");
    }
    println!("  Offer:    {}", claim.offer.title.bold());
    if let Some(product) = &claim.offer.product_name {
        println!("  Product:  {product}");
    }
    println!("  Discount: {}", claim.discount_info.display_text().green());
    if let (Some(original), Some(discounted)) = (
        claim.discount_info.original_price,
        claim.discount_info.discounted_price,
    ) {
        println!("  Price:    ${original:.2} -> ${discounted:.2}");
    }
    println!("  Claim ID: {}", claim.claim_id);
    println!("  Type:     {}", claim.claim_type.label());
    println!("  Claimed:  {}", claim.claimed_at);
}

fn print_completion(details: &RedemptionDetails) {
    println!("  Customer: {}", details.customer_name);
    println!("  Offer:    {}", details.offer_title);
    println!("  Claim ID: {}", details.claim_id);
    println!("  Redeemed: {}", details.redeemed_at);
    if let Some(notes) = &details.redemption_notes {
        println!("  Notes:    {notes}");
    }
}

fn print_history_page(page: &HistoryPage) {
    let p = &page.pagination;
    println!(
        "Redemption history - page {}/{} ({} total)",
        p.page, p.total_pages, p.total
    );
    for record in &page.redemptions {
        let status = if record.is_redeemed {
            "redeemed".green()
        } else {
            "pending".yellow()
        };
        println!(
            "  {}  {:<10}  {:<24}  {}",
            record.claim_id.as_deref().unwrap_or("-").bold(),
            status,
            record.offer.title,
            record.customer.name
        );
    }
    let s = &page.summary;
    println!(
        "Summary: {} redeemed / {} pending, ${:.2} savings provided ({:.1}% rate)",
        s.redeemed_claims, s.pending_claims, s.total_savings_provided, s.redemption_rate
    );
    let mut nav = Vec::new();
    if p.prev_available() {
        nav.push("prev");
    }
    if p.next_available() {
        nav.push("next");
    }
    if !nav.is_empty() {
        println!("Navigation: {}", nav.join(" / "));
    }
}
