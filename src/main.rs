use anyhow::Context;
use clap::Parser;
use cotizador::domain::model::format_money;
use cotizador::utils::{logger, validation::Validate};
use cotizador::{
    AppConfig, Cli, Client, Command, EntryWorkflow, LineItem, QuotationBrowser, QuotationForm,
    QuotationStore, QuoteRenderer,
};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting cotizador CLI");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    if let Err(e) = run(&cli) {
        tracing::error!("command failed: {:#}", e);
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli).context("loading configuration")?;
    config.validate().context("invalid configuration")?;

    let store = QuotationStore::new(&config.store_file);
    let renderer = QuoteRenderer::new(config.company.clone(), config.quote.clone());
    let workflow = EntryWorkflow::new(&store, &renderer, &config.output_dir);

    match &cli.command {
        Command::New => cmd_new(&workflow, &config),
        Command::List => cmd_list(&store, &config),
        Command::Render { id } => cmd_render(&store, &workflow, *id),
    }
}

fn cmd_new(workflow: &EntryWorkflow, config: &AppConfig) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Ingrese los datos del cliente");
    let client = Client {
        name: prompt(&mut input, "Nombre del cliente: ")?,
        tax_id: prompt(&mut input, "RUC: ")?,
        phone: prompt(&mut input, "Teléfono: ")?,
        email: prompt(&mut input, "E-mail: ")?,
        address: prompt(&mut input, "Dirección: ")?,
    };

    let count = prompt_item_count(&mut input)?;
    let mut items = Vec::new();
    for i in 1..=count {
        println!("Producto {}", i);
        items.push(LineItem {
            description: prompt(&mut input, "  Descripción: ")?,
            unit_price: prompt_parse::<Decimal>(&mut input, "  Precio: ")?,
            quantity: prompt_parse::<u32>(&mut input, "  Cantidad: ")?,
        });
    }

    let outcome = workflow.submit(QuotationForm { client, items })?;
    println!(
        "✅ Cotización #{} guardada en {}",
        outcome.quotation.id,
        config.store_file.display()
    );
    match (&outcome.pdf_path, &outcome.render_error) {
        (Some(path), _) => println!("📄 PDF generado: {}", path.display()),
        (None, Some(reason)) => eprintln!(
            "⚠️  La cotización quedó guardada pero el PDF falló: {}",
            reason
        ),
        (None, None) => {}
    }
    Ok(())
}

fn cmd_list(store: &QuotationStore, config: &AppConfig) -> anyhow::Result<()> {
    let browser = QuotationBrowser::new(store);
    let views = browser.list()?;
    if views.is_empty() {
        println!("No hay cotizaciones registradas.");
        return Ok(());
    }

    let prefix = &config.quote.currency_prefix;
    for view in &views {
        let q = &view.quotation;
        println!();
        println!("Cotización #{} - {}", q.id, q.client.name);
        if let Some(date) = &q.date {
            println!("Fecha: {}", date);
        }
        println!(
            "Cliente: RUC {} | {} | {} | {}",
            q.client.tax_id, q.client.phone, q.client.email, q.client.address
        );
        println!("Productos:");
        for (item, amounts) in q.items.iter().zip(&view.lines) {
            println!("- {}", item.description);
            println!("  Precio: {}", format_money(prefix, item.unit_price));
            println!("  Cantidad: {}", item.quantity);
            println!("  Subtotal: {}", format_money(prefix, amounts.subtotal));
            println!("  IGV (18%): {}", format_money(prefix, amounts.tax));
            println!("  Total: {}", format_money(prefix, amounts.total));
        }
        println!("TOTAL: {}", format_money(prefix, view.grand_total));
        println!("{}", "-".repeat(40));
    }
    Ok(())
}

fn cmd_render(store: &QuotationStore, workflow: &EntryWorkflow, id: u64) -> anyhow::Result<()> {
    let browser = QuotationBrowser::new(store);
    let quotation = browser.find(id)?;
    let path = workflow.render_to_file(&quotation)?;
    println!("📄 PDF generado: {}", path.display());
    Ok(())
}

fn prompt(input: &mut impl BufRead, label: &str) -> anyhow::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("entrada interrumpida (fin de archivo)");
    }
    Ok(line.trim().to_string())
}

fn prompt_parse<T: std::str::FromStr>(input: &mut impl BufRead, label: &str) -> anyhow::Result<T> {
    loop {
        let raw = prompt(input, label)?;
        match raw.parse() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Valor inválido, intente de nuevo."),
        }
    }
}

fn prompt_item_count(input: &mut impl BufRead) -> anyhow::Result<u32> {
    loop {
        let count: u32 = prompt_parse(input, "Número de productos: ")?;
        if count >= 1 {
            return Ok(count);
        }
        println!("Una cotización necesita al menos 1 producto.");
    }
}
