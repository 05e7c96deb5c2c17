//! Built-in configurations for the property-management admin screens.

use super::ViewConfig;
use crate::query::{Comparison, FilterCriterion, MetricSpec, SortSpec};

pub const PRESET_NAMES: [&str; 6] = [
    "transactions",
    "companies",
    "api_keys",
    "bookings",
    "vip_guests",
    "room_status",
];

pub fn by_name(name: &str) -> Option<ViewConfig> {
    match name {
        "transactions" => Some(transactions()),
        "companies" => Some(companies()),
        "api_keys" => Some(api_keys()),
        "bookings" => Some(bookings()),
        "vip_guests" => Some(vip_guests()),
        "room_status" => Some(room_status()),
        _ => None,
    }
}

fn select(field: &str) -> FilterCriterion {
    FilterCriterion::equals(field, "all")
}

fn date_bounds(config: ViewConfig, field: &str) -> ViewConfig {
    config
        .filter(FilterCriterion::date_from(field, ""))
        .filter(FilterCriterion::date_to(field, ""))
}

fn status_count(name: &str, status: &str) -> MetricSpec {
    MetricSpec::count_where(name, vec![FilterCriterion::equals("status", status)])
}

/// Corporate credit transactions.
pub fn transactions() -> ViewConfig {
    let config = ViewConfig::new("transactions")
        .search_fields(&["reference", "description", "company.name", "company.email"])
        .default_sort(SortSpec::desc("timestamps.created"))
        .page_size(10)
        .filter(select("status"))
        .filter(select("type"))
        .columns(&["reference", "company", "type", "amount", "status", "timestamps.created"])
        .metric(MetricSpec::count("transactions"))
        .metric(MetricSpec::sum("totalAmount", "amount"))
        .metric(status_count("pending", "pending"))
        .metric(status_count("approved", "approved"))
        .metric(status_count("rejected", "rejected"));
    date_bounds(config, "timestamps.created")
}

/// Companies holding corporate credit accounts.
pub fn companies() -> ViewConfig {
    ViewConfig::new("companies")
        .search_fields(&["name", "email", "contactPerson", "phone"])
        .default_sort(SortSpec::desc("createdAt"))
        .filter(select("status"))
        .filter(FilterCriterion::new("creditLimit", "creditLimit", Comparison::Range { min: None, max: None }))
        .columns(&["name", "email", "creditLimit", "currentBalance", "status"])
        .metric(MetricSpec::count("companies"))
        .metric(MetricSpec::sum("totalCreditLimit", "creditLimit"))
        .metric(MetricSpec::sum("totalOutstanding", "currentBalance"))
        .metric(MetricSpec::count_by("byStatus", "status"))
}

/// API keys and webhook credentials.
pub fn api_keys() -> ViewConfig {
    ViewConfig::new("api_keys")
        .search_fields(&["name", "prefix", "owner.name", "owner.email"])
        .default_sort(SortSpec::desc("createdAt"))
        .filter(select("status"))
        .filter(select("environment"))
        .columns(&["name", "prefix", "environment", "status", "usage.requests", "lastUsedAt"])
        .metric(MetricSpec::count("keys"))
        .metric(status_count("active", "active"))
        .metric(MetricSpec::sum("requests", "usage.requests"))
        .metric(MetricSpec::average("avgRequests", "usage.requests"))
}

/// Room bookings and meetup scheduling.
pub fn bookings() -> ViewConfig {
    let config = ViewConfig::new("bookings")
        .search_fields(&["guestName", "guestEmail", "room.name", "purpose"])
        .default_sort(SortSpec::asc("startTime"))
        .page_size(20)
        .filter(select("status"))
        .filter(select("room.type"))
        .columns(&["guestName", "room", "startTime", "endTime", "totalPrice", "status"])
        .metric(MetricSpec::count("bookings"))
        .metric(MetricSpec::sum("revenue", "totalPrice"))
        .metric(MetricSpec::average("averageBooking", "totalPrice"))
        .metric(MetricSpec::count_by("byStatus", "status"));
    date_bounds(config, "startTime")
}

/// VIP guest programme members.
pub fn vip_guests() -> ViewConfig {
    ViewConfig::new("vip_guests")
        .search_fields(&["name", "email", "phone", "preferences"])
        .default_sort(SortSpec::desc("lastStayDate"))
        .filter(FilterCriterion::new("tier", "tier", Comparison::OneOf(Vec::new())))
        .columns(&["name", "tier", "totalStays", "lifetimeSpend", "lastStayDate"])
        .metric(MetricSpec::count("guests"))
        .metric(MetricSpec::count_by("byTier", "tier"))
        .metric(MetricSpec::sum("lifetimeSpend", "lifetimeSpend"))
        .metric(MetricSpec::average("averageSpend", "lifetimeSpend"))
}

/// Housekeeping room-status dashboard.
pub fn room_status() -> ViewConfig {
    ViewConfig::new("room_status")
        .search_fields(&["roomNumber", "assignedTo.name", "notes"])
        .default_sort(SortSpec::asc("roomNumber"))
        .page_size(50)
        .filter(select("status"))
        .filter(select("floor"))
        .columns(&["roomNumber", "floor", "status", "assignedTo", "updatedAt"])
        .metric(MetricSpec::count("rooms"))
        .metric(MetricSpec::count_by("byStatus", "status"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_preset_is_valid() {
        for name in PRESET_NAMES {
            let config = by_name(name).unwrap();
            assert_eq!(config.name, name);
            assert!(config.validate().is_ok(), "preset {} is invalid", name);
            assert!(!config.default_filters.has_active(), "preset {} starts filtered", name);
        }
        assert!(by_name("unknown").is_none());
    }
}
