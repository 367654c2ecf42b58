/// Scripted walk through one clinic day.
///
/// Sets up a doctor, books the morning, accepts patients as they arrive and
/// serves them in order, then prints the day's statistics as JSON.

use dotenv::dotenv;
use medcenter::{CenterConfig, MedCenter, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DAY: &str = "2023-06-27";

fn run_demo(center: &mut MedCenter) -> Result<()> {
    center.add_specialties(&["Cardiology", "Dermatology"]);
    center.add_doctor("D1", "Mario", "Rossi", "Cardiology")?;
    center.add_doctor("D2", "Anna", "Bianchi", "Dermatology")?;

    let slots = center.add_daily_schedule("D1", DAY, "09:00", "10:00", 20)?;
    center.add_daily_schedule("D2", DAY, "14:00", "16:00", 30)?;
    println!("Created schedule for D1 with {} slots", slots);

    for (doctor, ranges) in center.find_slots(DAY, "Cardiology")? {
        println!("  {}: {}", doctor, ranges.join(", "));
    }

    let bookings = [
        ("SSN001", "John", "Smith", "09:00-09:20"),
        ("SSN002", "Jane", "Doe", "09:20-09:40"),
        ("SSN003", "Bob", "Wilson", "09:40-10:00"),
    ];
    for (ssn, name, surname, slot) in bookings {
        let id = center.book_appointment(ssn, name, surname, "D1", DAY, slot)?;
        println!("  {} -> {} {} at {}", id, name, surname, slot);
    }
    if let Err(e) = center.book_appointment("SSN004", "Alice", "Brown", "D1", DAY, "09:00-09:20") {
        println!("  Second booking of 09:00-09:20 refused: {}", e);
    }

    let today = center.set_current_date(DAY)?;
    println!("\n{} appointments today", today);

    center.accept("SSN003");
    center.accept("SSN001");

    while let Some(next) = center.next_appointment("D1") {
        println!("  D1 now serving {}", next);
        center.complete_appointment("D1", &next)?;
    }
    println!("  D1 queue empty");

    let report = center.daily_report("D1", DAY)?;
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("\n{}", json),
        Err(e) => error!("Could not render report: {}", e),
    }

    for (doctor, completeness) in center.schedule_completeness() {
        match completeness {
            Some(value) => println!("  {} completeness {:.2}", doctor, value),
            None => println!("  {} has no slots", doctor),
        }
    }

    Ok(())
}

fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting medical centre demo");

    let mut center = MedCenter::new(CenterConfig::from_env());
    if let Err(e) = run_demo(&mut center) {
        error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}
