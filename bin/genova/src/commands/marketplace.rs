//! Tutor search and booking commands.

use anyhow::Result;

use genova_client::{CreateBooking, TutorQuery};

use crate::config::CliConfig;

/// Search tutors.
pub async fn tutors(query: TutorQuery, output_json: bool, config: &CliConfig) -> Result<()> {
    let client = super::build_client(config)?;
    let tutors = client
        .list_tutors(&query)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&tutors)?);
        return Ok(());
    }

    if tutors.is_empty() {
        println!("No tutors found.");
        return Ok(());
    }
    for tutor in tutors {
        println!(
            "{:<8} {:<16} {:>6}.{:02}/h  {:<8} {}",
            tutor.id,
            tutor.name,
            tutor.hourly_rate / 100,
            tutor.hourly_rate % 100,
            tutor
                .rating
                .map(|r| format!("{:.1}*", r))
                .unwrap_or_else(|| "-".to_string()),
            tutor.subjects.join(","),
        );
    }
    Ok(())
}

/// List the user's bookings.
pub async fn bookings(output_json: bool, config: &CliConfig) -> Result<()> {
    let client = super::build_client(config)?;
    let bookings = client
        .list_bookings()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if output_json {
        println!("{}", serde_json::to_string_pretty(&bookings)?);
        return Ok(());
    }

    if bookings.is_empty() {
        println!("No bookings.");
        return Ok(());
    }
    for booking in bookings {
        println!(
            "{:<8} {:<20} {:<10} {:>4}min  {}",
            booking.id, booking.scheduled_at, booking.subject, booking.duration_minutes,
            booking.status,
        );
    }
    Ok(())
}

/// Book a session with a tutor.
pub async fn book(booking: CreateBooking, config: &CliConfig) -> Result<()> {
    let client = super::build_client(config)?;
    let created = client
        .create_booking(&booking)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Booking {} created ({}).", created.id, created.status);
    Ok(())
}

/// Cancel a booking.
pub async fn cancel(id: &str, config: &CliConfig) -> Result<()> {
    let client = super::build_client(config)?;
    client
        .cancel_booking(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Booking {} cancelled.", id);
    Ok(())
}
