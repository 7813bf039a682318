//! First-run seed data.
//!
//! # Responsibility
//! - Provision the stock notebook set on an empty store.
//!
//! # Invariants
//! - Seeding is a no-op when any notebook already exists.
//! - All inserts happen in one transaction.

use super::DbResult;
use log::info;
use rusqlite::{params, Connection};
use uuid::Uuid;

/// (name, icon, category, description) of the stock notebooks.
const DEFAULT_NOTEBOOKS: &[(&str, &str, &str, &str)] = &[
    (
        "Compliance & Legal",
        "Scale",
        "Operations",
        "Legal compliance, contracts, and regulatory matters",
    ),
    (
        "Startup Launch",
        "Rocket",
        "Projects",
        "Launch planning and execution",
    ),
    (
        "SaaS",
        "Code",
        "Products",
        "SaaS product development and management",
    ),
    (
        "Professional Services",
        "Users",
        "Products",
        "Consulting and services offerings",
    ),
    (
        "Digital Presence & IT",
        "Globe",
        "Tech",
        "Website, infrastructure, and IT systems",
    ),
    (
        "Sales & Growth",
        "TrendingUp",
        "Business",
        "Sales strategy and growth initiatives",
    ),
    (
        "Customer & Support",
        "Heart",
        "Operations",
        "Customer success and support processes",
    ),
    (
        "Operations & Compliance",
        "Building2",
        "Operations",
        "Day-to-day operations and compliance",
    ),
    (
        "Finance",
        "DollarSign",
        "Business",
        "Financial planning and accounting",
    ),
    (
        "Metrics & Dashboard",
        "BarChart3",
        "Business",
        "KPIs and business metrics",
    ),
    (
        "Marketing & Brand",
        "Megaphone",
        "Business",
        "Marketing campaigns and brand management",
    ),
    (
        "Innovation & R&D",
        "FlaskConical",
        "Projects",
        "Research and development initiatives",
    ),
    (
        "Investor Relations",
        "Globe",
        "Business",
        "Investor communications and fundraising",
    ),
    (
        "Misc / General Ops",
        "Package",
        "Operations",
        "General operations and miscellaneous",
    ),
    (
        "Team & Culture",
        "Users",
        "Operations",
        "HR, team building, and company culture",
    ),
];

/// Inserts the stock notebooks when the store is empty.
///
/// Returns the number of notebooks inserted (0 when the table already has
/// rows).
///
/// # Side effects
/// - Emits a `db_seed` logging event.
pub fn seed_default_notebooks(conn: &mut Connection) -> DbResult<usize> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM notebooks;", [], |row| row.get(0))?;
    if existing > 0 {
        info!("event=db_seed module=db status=skipped existing={existing}");
        return Ok(0);
    }

    let tx = conn.transaction()?;
    for (name, icon, category, description) in DEFAULT_NOTEBOOKS {
        tx.execute(
            "INSERT INTO notebooks (uuid, name, description, icon, category)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![Uuid::new_v4().to_string(), name, description, icon, category],
        )?;
    }
    tx.commit()?;

    info!(
        "event=db_seed module=db status=ok inserted={}",
        DEFAULT_NOTEBOOKS.len()
    );
    Ok(DEFAULT_NOTEBOOKS.len())
}
