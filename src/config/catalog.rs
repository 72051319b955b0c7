//! Fixed catalog of exposed tables. Each table is bound to exactly one route.

/// A table served by the backend. Order follows foreign-key dependencies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    ChurchPrograms,
    EventVolunteers,
    Notifications,
    Analytics,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Users,
        Table::ChurchPrograms,
        Table::EventVolunteers,
        Table::Notifications,
        Table::Analytics,
    ];

    /// Table name in the remote store.
    pub fn name(self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::ChurchPrograms => "church_programs",
            Table::EventVolunteers => "event_volunteers",
            Table::Notifications => "notifications",
            Table::Analytics => "analytics",
        }
    }

    /// HTTP path that dumps this table.
    pub fn route(self) -> &'static str {
        match self {
            Table::Users => "/users/",
            Table::ChurchPrograms => "/church_programs/",
            Table::EventVolunteers => "/event_volunteers/",
            Table::Notifications => "/notifications/",
            Table::Analytics => "/analytics/",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn routes_and_names_are_unique() {
        let names: HashSet<_> = Table::ALL.iter().map(|t| t.name()).collect();
        let routes: HashSet<_> = Table::ALL.iter().map(|t| t.route()).collect();
        assert_eq!(names.len(), Table::ALL.len());
        assert_eq!(routes.len(), Table::ALL.len());
    }

    #[test]
    fn route_is_table_name_with_slashes() {
        for table in Table::ALL {
            assert_eq!(table.route(), format!("/{}/", table.name()));
        }
    }
}
