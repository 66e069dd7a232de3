//! Builds the Bermudan swaption from `[deal]` and `[exercise]`.

use pricer_core::types::{BusinessDayConvention, Calendar, Date, DayCountConvention};
use pricer_models::instruments::rates::{OisSwap, SwapDirection, Swaption};
use pricer_models::instruments::Exercise;
use pricer_models::schedules::{Frequency, ScheduleBuilder};
use tracing::info;

use crate::config::{BermudanConfig, ExerciseMode};
use crate::Result;

/// The instrument plus the labels the report prints.
#[derive(Debug, Clone)]
pub struct Deal {
    pub swaption: Swaption,
    pub valuation_date: Date,
    pub swap_start: Date,
    pub swap_end: Date,
    pub currency: String,
}

/// Holiday calendar for a currency code.
pub fn calendar_for(currency: &str) -> Calendar {
    if currency.eq_ignore_ascii_case("CAD") {
        Calendar::Canada
    } else {
        Calendar::WeekendsOnly
    }
}

/// Parses deal terms and generates the schedule and exercise dates.
pub fn build(config: &BermudanConfig) -> Result<Deal> {
    let deal = &config.deal;
    let valuation_date: Date = deal.valuation_date.parse()?;
    let swap_start: Date = deal.swap_start.parse()?;
    let swap_end: Date = deal.swap_end.parse()?;
    let direction: SwapDirection = deal.direction.parse()?;
    let frequency: Frequency = deal.fixed_frequency.parse()?;
    let day_count: DayCountConvention = deal.day_count.parse()?;
    let convention: BusinessDayConvention = deal.business_day_convention.parse()?;
    let calendar = match &deal.calendar {
        Some(name) => name.parse()?,
        None => calendar_for(&deal.currency),
    };

    let schedule = ScheduleBuilder::new()
        .start(swap_start)
        .end(swap_end)
        .frequency(frequency)
        .day_count(day_count)
        .calendar(calendar)
        .convention(convention)
        .build()?;

    let exercise = match config.exercise.mode {
        ExerciseMode::Auto => Exercise::from_schedule(&schedule, swap_start)?,
        ExerciseMode::Custom => Exercise::bermudan(
            config
                .exercise
                .custom_dates
                .iter()
                .map(|d| d.parse::<Date>())
                .collect::<std::result::Result<Vec<Date>, _>>()?,
        )?,
    };
    info!(
        exercise_dates = exercise.len(),
        first = %exercise.first_date(),
        last = %exercise.last_date(),
        "exercise schedule"
    );

    let swap = OisSwap::new(
        deal.notional,
        deal.strike / 100.0,
        direction,
        schedule,
        deal.payment_lag,
    )?;

    Ok(Deal {
        swaption: Swaption::new(swap, exercise),
        valuation_date,
        swap_start,
        swap_end,
        currency: deal.currency.clone(),
    })
}
