//! Declarative DDL for the served tables. Relationships and label sets are enforced by the database;
//! the HTTP layer never checks them.

use crate::config::Table;
use crate::error::StoreError;
use crate::store::pg::quote_ident;
use sqlx::PgPool;

/// Labels allowed in `users.role`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Leader,
    Volunteer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Leader, Role::Volunteer];

    pub fn label(self) -> &'static str {
        match self {
            Role::Leader => "líder",
            Role::Volunteer => "voluntário",
        }
    }
}

/// Labels allowed in `event_volunteers.status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolunteerStatus {
    Pending,
    Accepted,
    Declined,
}

impl VolunteerStatus {
    pub const ALL: [VolunteerStatus; 3] = [
        VolunteerStatus::Pending,
        VolunteerStatus::Accepted,
        VolunteerStatus::Declined,
    ];

    pub fn label(self) -> &'static str {
        match self {
            VolunteerStatus::Pending => "pendente",
            VolunteerStatus::Accepted => "aceito",
            VolunteerStatus::Declined => "recusado",
        }
    }
}

fn literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

fn one_of<'a>(column: &str, labels: impl IntoIterator<Item = &'a str>) -> String {
    let values: Vec<String> = labels.into_iter().map(literal).collect();
    format!("CHECK ({} IN ({}))", quote_ident(column), values.join(", "))
}

fn references(schema: &str, table: Table) -> String {
    format!(
        "REFERENCES {}.{} (\"id\") ON DELETE CASCADE",
        quote_ident(schema),
        quote_ident(table.name())
    )
}

fn column_defs(schema: &str, table: Table) -> Vec<String> {
    let id = "\"id\" UUID PRIMARY KEY DEFAULT gen_random_uuid()".to_string();
    match table {
        Table::Users => vec![
            id,
            "\"name\" VARCHAR(255) NOT NULL".into(),
            "\"email\" VARCHAR(254) NOT NULL UNIQUE".into(),
            format!(
                "\"role\" VARCHAR(20) NOT NULL {}",
                one_of("role", Role::ALL.iter().map(|r| r.label()))
            ),
        ],
        Table::ChurchPrograms => vec![
            id,
            "\"name\" VARCHAR(255) NOT NULL".into(),
            "\"category\" VARCHAR(100) NOT NULL".into(),
            "\"description\" TEXT".into(),
            "\"day_of_week\" VARCHAR(20) NOT NULL".into(),
            "\"start_time\" TIME NOT NULL".into(),
            "\"duration\" INTERVAL NOT NULL".into(),
            format!("\"leader_id\" UUID NOT NULL {}", references(schema, Table::Users)),
        ],
        Table::EventVolunteers => vec![
            id,
            format!("\"event_id\" UUID NOT NULL {}", references(schema, Table::ChurchPrograms)),
            format!("\"volunteer_id\" UUID NOT NULL {}", references(schema, Table::Users)),
            format!(
                "\"status\" VARCHAR(20) NOT NULL DEFAULT {} {}",
                literal(VolunteerStatus::Pending.label()),
                one_of("status", VolunteerStatus::ALL.iter().map(|s| s.label()))
            ),
            "\"notified_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW()".into(),
        ],
        Table::Notifications => vec![
            id,
            format!("\"user_id\" UUID NOT NULL {}", references(schema, Table::Users)),
            "\"message\" TEXT NOT NULL".into(),
            "\"is_read\" BOOLEAN NOT NULL DEFAULT FALSE".into(),
            "\"created_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW()".into(),
        ],
        Table::Analytics => vec![
            id,
            format!("\"event_id\" UUID NOT NULL {}", references(schema, Table::ChurchPrograms)),
            "\"volunteer_count\" INTEGER NOT NULL DEFAULT 0".into(),
            "\"engagement_score\" DOUBLE PRECISION NOT NULL DEFAULT 0".into(),
            "\"created_at\" TIMESTAMPTZ NOT NULL DEFAULT NOW()".into(),
        ],
    }
}

/// `CREATE TABLE IF NOT EXISTS` statements in foreign-key dependency order.
pub fn ddl(schema: &str) -> Vec<String> {
    Table::ALL
        .iter()
        .map(|&table| {
            format!(
                "CREATE TABLE IF NOT EXISTS {}.{} (\n    {}\n)",
                quote_ident(schema),
                quote_ident(table.name()),
                column_defs(schema, table).join(",\n    ")
            )
        })
        .collect()
}

/// Create the schema and any missing tables. Existing tables are left untouched.
pub async fn apply_schema(pool: &PgPool, schema: &str) -> Result<(), StoreError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(schema)))
        .execute(pool)
        .await?;
    for stmt in ddl(schema) {
        tracing::debug!(sql = %stmt, "ddl");
        sqlx::query(&stmt).execute(pool).await?;
    }
    tracing::info!(schema = %schema, tables = Table::ALL.len(), "schema applied");
    Ok(())
}
