use host_assistant::importer::PropertyImporter;
use host_assistant::latency::Latency;
use host_assistant::models::{ImportOutcome, Property, Role};
use host_assistant::responder::{ChatSimulator, COMMON_QUESTIONS};
use host_assistant::AssistantConfig;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: host-assistant [chat <message>... | import [--live] <url>...]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AssistantConfig::from_env()?;

    info!("🏠 HostMate - Digital Host Assistant");
    info!("====================================");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("chat") => run_chat(&config, &args[1..]).await,
        Some("import") => run_import(&config, &args[1..]).await,
        None => run_demo(&config).await,
        Some(other) => {
            warn!("Unknown command: {}", other);
            println!("{}", USAGE);
            Ok(())
        }
    }
}

async fn run_chat(config: &AssistantConfig, messages: &[String]) -> anyhow::Result<()> {
    if messages.is_empty() {
        println!("{}", USAGE);
        return Ok(());
    }

    let chat = ChatSimulator::new(config);
    for message in messages {
        chat.send(message).await;
    }
    print_transcript(&chat);
    Ok(())
}

async fn run_import(config: &AssistantConfig, args: &[String]) -> anyhow::Result<()> {
    let live = args.iter().any(|a| a == "--live");
    let urls: Vec<&String> = args.iter().filter(|a| *a != "--live").collect();
    if urls.is_empty() {
        println!("{}", USAGE);
        return Ok(());
    }

    let importer = PropertyImporter::from_config(config)?;
    if live {
        info!("Fetching listings through {}", config.importer.proxy_url);
    }

    let mut imported = Vec::new();
    for url in urls {
        let outcome = if live {
            importer.import_property(url).await
        } else {
            importer.simulate_import(url).await
        };

        match outcome {
            ImportOutcome::Success(property) => imported.push(property),
            ImportOutcome::Failure(reason) => println!("❌ {}: {}", url, reason),
        }
    }

    print_properties(&imported);
    save_properties(&imported).await
}

async fn run_demo(config: &AssistantConfig) -> anyhow::Result<()> {
    info!("Running the common questions through the chatbot...");
    let chat = ChatSimulator::new(config).with_latency(Latency::None, Latency::None);
    for index in 0..COMMON_QUESTIONS.len() {
        chat.ask_quick_question(index).await;
    }
    print_transcript(&chat);

    info!("Simulating a listing import...");
    let importer = PropertyImporter::from_config(config)?.with_latency(Latency::None);
    let imported: Vec<Property> = importer
        .simulate_import("https://www.booking.com/hotel/es/centro.html")
        .await
        .into_property()
        .into_iter()
        .collect();

    print_properties(&imported);
    Ok(())
}

fn print_transcript(chat: &ChatSimulator) {
    for message in chat.transcript() {
        let who = match message.role {
            Role::Guest => "👤",
            Role::Assistant => "🤖",
        };
        println!("{} [{}] {}", who, message.created_at.format("%H:%M:%S"), message.text);
    }
    println!();
}

fn print_properties(properties: &[Property]) {
    info!("\n✅ Imported {} properties\n", properties.len());

    for (i, property) in properties.iter().enumerate() {
        println!(
            "{}. {} ({} {})",
            i + 1,
            property.name,
            property.price.base,
            property.price.currency
        );
        println!("   {}", property.address);
        println!("   Check-in {} / Check-out {}", property.check_in_time, property.check_out_time);
        println!("   Guests: {}, parking: {}", property.max_guests, property.parking);
        println!("   Amenities: {}", property.amenities.join(", "));
        println!("   Platform: {}", property.platform);
        println!("   URL: {}", property.original_url);
        println!();
    }
}

async fn save_properties(properties: &[Property]) -> anyhow::Result<()> {
    if properties.is_empty() {
        return Ok(());
    }

    let json = serde_json::to_string_pretty(properties)?;
    tokio::fs::write("imported_properties.json", json).await?;
    info!("💾 Saved {} properties to imported_properties.json", properties.len());
    Ok(())
}
