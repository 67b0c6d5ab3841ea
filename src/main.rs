use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pos_terminal::{
    api::{Backend, HttpBackend},
    config::AppConfig,
    error::{ApiError, AppError},
    models::{User, format_money},
    permissions::{self, Resource, RouteDecision},
    sales::{self, LookupState, SaleEntry},
    session::{self, Session},
};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pos_terminal=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let backend = HttpBackend::new(&config)?;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    tracing::info!(api = %config.api_url, "pos terminal starting");

    loop {
        let Some(session) = login_loop(&backend, &mut input).await? else {
            return Ok(());
        };
        if !page_loop(&backend, &config, &mut input, session).await? {
            return Ok(());
        }
    }
}

async fn prompt(input: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_owned()))
}

async fn login_loop(backend: &HttpBackend, input: &mut Input) -> anyhow::Result<Option<Session>> {
    loop {
        let Some(email) = prompt(input, "email (blank to quit): ").await? else {
            return Ok(None);
        };
        if email.is_empty() {
            return Ok(None);
        }
        let Some(password) = prompt(input, "password: ").await? else {
            return Ok(None);
        };
        match Session::sign_in(backend, &email, &password).await {
            Ok(session) => {
                println!("welcome, {}", session.user.name);
                return Ok(Some(session));
            }
            Err(error) => println!("{}", session::login_failure_message(&error)),
        }
    }
}

/// Returns `true` when the session died and the operator should sign in
/// again, `false` on a clean quit.
async fn page_loop(
    backend: &HttpBackend,
    config: &AppConfig,
    input: &mut Input,
    session: Session,
) -> anyhow::Result<bool> {
    loop {
        let pages = permissions::visible_pages(Some(&session.user));
        println!();
        for (index, page) in pages.iter().enumerate() {
            println!("  {}. {} ({})", index + 1, page.title, page.path);
        }
        let Some(choice) = prompt(input, "go to (number or path, q to quit): ").await? else {
            return Ok(false);
        };
        if choice.is_empty() || choice == "q" {
            session.sign_out(backend);
            return Ok(false);
        }

        let path = match choice.parse::<usize>() {
            Ok(number) => match number.checked_sub(1).and_then(|index| pages.get(index)) {
                Some(page) => page.path.to_owned(),
                None => {
                    println!("no such page");
                    continue;
                }
            },
            Err(_) => choice,
        };

        let path = match permissions::authorize(Some(&session.user), &path) {
            RouteDecision::Allow => path,
            RouteDecision::RedirectHome => {
                println!("you do not have access to {path}");
                "/".to_owned()
            }
            RouteDecision::RedirectToLogin => return Ok(true),
        };

        let outcome = match path.as_str() {
            "/" => dashboard(backend).await,
            "/sales" => sales_page(backend, config, input, &session.user).await,
            "/inventory" => inventory_page(backend, input).await,
            "/reports" => reports_page(backend).await,
            other => {
                println!("{other} is managed in the back office");
                Ok(())
            }
        };
        if let Err(error) = outcome {
            if is_unauthorized(&error) {
                println!("session expired, sign in again");
                return Ok(true);
            }
            println!("error: {error}");
        }
    }
}

async fn dashboard(backend: &dyn Backend) -> anyhow::Result<()> {
    let summary = backend.daily_summary().await?;
    println!(
        "today: {} sale(s), {} item(s) sold, revenue {}",
        summary.total_sales,
        summary.total_items_sold,
        format_money(summary.total_revenue)
    );
    Ok(())
}

async fn reports_page(backend: &dyn Backend) -> anyhow::Result<()> {
    let summary = backend.daily_summary().await?;
    let recent = backend.recent_sales(sales::RECENT_SALES_LIMIT).await?;
    println!(
        "daily report: {} sale(s), {} item(s) sold, revenue {}",
        summary.total_sales,
        summary.total_items_sold,
        format_money(summary.total_revenue)
    );
    println!("{} sale(s) on the recent ledger", recent.len());
    Ok(())
}

async fn inventory_page(backend: &dyn Backend, input: &mut Input) -> anyhow::Result<()> {
    let Some(raw) = prompt(input, "low-stock threshold [10]: ").await? else {
        return Ok(());
    };
    let threshold = raw.parse().unwrap_or(10);
    let items = backend.low_stock(threshold).await?;
    if items.is_empty() {
        println!("no items below threshold {threshold}");
    }
    for item in items {
        println!("  {:<16} {:<24} {} left", item.barcode, item.name, item.stock);
    }
    Ok(())
}

async fn sales_page(
    backend: &dyn Backend,
    config: &AppConfig,
    input: &mut Input,
    user: &User,
) -> anyhow::Result<()> {
    let ledger = backend.recent_sales(sales::RECENT_SALES_LIMIT).await?;
    let Some(filter) = prompt(input, "filter (blank for all): ").await? else {
        return Ok(());
    };
    for sale in sales::filter_sales(&ledger, &filter) {
        println!(
            "  {}  {:<24} x{:<3} {:>10}  {}",
            sale.sold_at.format("%d/%m/%Y %H:%M"),
            sale.item_name,
            sale.quantity,
            format_money(sale.total),
            sale.cashier.as_deref().unwrap_or("-")
        );
    }

    if !permissions::can_create(Some(user), Resource::Sales) {
        return Ok(());
    }
    let Some(answer) = prompt(input, "new sale? (y/N): ").await? else {
        return Ok(());
    };
    if answer != "y" {
        return Ok(());
    }
    sale_entry_loop(backend, config, input).await
}

async fn sale_entry_loop(
    backend: &dyn Backend,
    config: &AppConfig,
    input: &mut Input,
) -> anyhow::Result<()> {
    let mut entry = SaleEntry::new(config.device_id.clone());
    println!("scan items; 'done' to finalize, 'drop <barcode>' to remove, 'qty <barcode> <n>' to change, 'cancel' to abort");
    loop {
        let Some(line) = prompt(input, "barcode> ").await? else {
            entry.cancel();
            return Ok(());
        };
        match line.as_str() {
            "cancel" => {
                entry.cancel();
                println!("sale cancelled");
                return Ok(());
            }
            "done" => match entry.finalize(backend).await {
                Ok(summary) => {
                    println!(
                        "sale completed: {} line(s), total {}",
                        summary.lines_sold,
                        format_money(summary.total_amount)
                    );
                    tokio::time::sleep(sales::POST_SALE_REFRESH_DELAY).await;
                    let refreshed = backend.recent_sales(sales::RECENT_SALES_LIMIT).await?;
                    println!("{} sale(s) on the recent ledger", refreshed.len());
                    return Ok(());
                }
                Err(AppError::Api(ApiError::Unauthorized)) => {
                    return Err(ApiError::Unauthorized.into());
                }
                // Cart kept intact; the operator can fix up and retry.
                Err(error) => println!("{error}"),
            },
            command if command.starts_with("drop ") => {
                entry.remove_line(command.trim_start_matches("drop ").trim());
                render_cart(&entry);
            }
            command if command.starts_with("qty ") => {
                let mut parts = command.split_whitespace().skip(1);
                match (
                    parts.next(),
                    parts.next().and_then(|raw| raw.parse::<i32>().ok()),
                ) {
                    (Some(barcode), Some(quantity)) => {
                        if let Err(error) = entry.set_line_quantity(barcode, quantity) {
                            println!("{error}");
                        }
                        render_cart(&entry);
                    }
                    _ => println!("usage: qty <barcode> <quantity>"),
                }
            }
            barcode => {
                entry.enter_barcode(backend, barcode).await?;
                match entry.lookup().clone() {
                    LookupState::Found(item) => {
                        println!(
                            "{}, {} ({} in stock)",
                            item.name,
                            format_money(item.price),
                            item.stock
                        );
                        let Some(quantity) = prompt(input, "quantity [1]: ").await? else {
                            entry.cancel();
                            return Ok(());
                        };
                        if !quantity.is_empty() {
                            entry.set_quantity_input(quantity);
                        }
                        match entry.add_to_cart() {
                            Ok(()) => {
                                println!("{}", sales::ADDED_TO_CART);
                                render_cart(&entry);
                            }
                            Err(error) => println!("{error}"),
                        }
                    }
                    LookupState::NotFound(message) => println!("{message}"),
                    LookupState::Idle | LookupState::Searching => {}
                }
            }
        }
    }
}

fn render_cart(entry: &SaleEntry) {
    if entry.cart().is_empty() {
        println!("cart is empty");
        return;
    }
    for line in entry.cart().lines() {
        println!(
            "  {:<16} {:<24} x{:<3} {:>10}",
            line.barcode,
            line.name,
            line.quantity,
            format_money(line.subtotal())
        );
    }
    println!("  total: {}", format_money(entry.cart().total()));
}

fn is_unauthorized(error: &anyhow::Error) -> bool {
    matches!(error.downcast_ref::<ApiError>(), Some(ApiError::Unauthorized))
        || matches!(
            error.downcast_ref::<AppError>(),
            Some(AppError::Api(ApiError::Unauthorized))
        )
}
