//! Declarative query descriptions.
//!
//! A [`Query`] captures everything a route needs from the database: the
//! table, a projection (PostgREST embedded-resource syntax for joins),
//! equality/range/prefix filters, and an optional ascending sort. Rendering
//! to PostgREST query parameters is kept here so it can be tested without
//! a network.

/// A single filter clause. Column names may be embedded-resource paths
/// such as `circuits.circuitRef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq { column: &'static str, value: String },
    /// `column >= value`
    Gte { column: &'static str, value: String },
    /// `column <= value`
    Lte { column: &'static str, value: String },
    /// case-insensitive prefix match, `column ILIKE 'value%'`
    IlikePrefix { column: &'static str, value: String },
}

/// A read-only query against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub table: &'static str,
    select: &'static str,
    filters: Vec<Filter>,
    order: Option<&'static str>,
}

impl Query {
    /// Start a query against `table`, selecting all columns.
    pub fn from(table: &'static str) -> Self {
        Self {
            table,
            select: "*",
            filters: Vec::new(),
            order: None,
        }
    }

    /// Replace the projection. Joined tables use the embedded-resource
    /// syntax, e.g. `name,circuits!inner(name,location,country)`.
    pub fn select(mut self, columns: &'static str) -> Self {
        self.select = columns;
        self
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column,
            value: value.into(),
        });
        self
    }

    pub fn gte(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Gte {
            column,
            value: value.into(),
        });
        self
    }

    pub fn lte(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Lte {
            column,
            value: value.into(),
        });
        self
    }

    pub fn ilike_prefix(mut self, column: &'static str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::IlikePrefix {
            column,
            value: value.into(),
        });
        self
    }

    /// Sort ascending by `column`. The catalog never sorts descending.
    pub fn order_asc(mut self, column: &'static str) -> Self {
        self.order = Some(column);
        self
    }

    /// Render as PostgREST query parameters, in a stable order:
    /// `select`, then filters in insertion order, then `order`.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select.to_string())];

        for filter in &self.filters {
            match filter {
                Filter::Eq { column, value } => {
                    params.push((column.to_string(), format!("eq.{value}")));
                }
                Filter::Gte { column, value } => {
                    params.push((column.to_string(), format!("gte.{value}")));
                }
                Filter::Lte { column, value } => {
                    params.push((column.to_string(), format!("lte.{value}")));
                }
                Filter::IlikePrefix { column, value } => {
                    params.push((column.to_string(), format!("ilike.{value}%")));
                }
            }
        }

        if let Some(column) = self.order {
            params.push(("order".to_string(), format!("{column}.asc")));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_by_default() {
        let params = Query::from("seasons").to_params();
        assert_eq!(params, vec![("select".to_string(), "*".to_string())]);
    }

    #[test]
    fn test_eq_and_order() {
        let params = Query::from("races")
            .select("name")
            .eq("year", "2020")
            .order_asc("round")
            .to_params();

        assert_eq!(
            params,
            vec![
                ("select".to_string(), "name".to_string()),
                ("year".to_string(), "eq.2020".to_string()),
                ("order".to_string(), "round.asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_embedded_column_filter() {
        let params = Query::from("races")
            .select("name,year,circuits!inner(name,location,country,circuitRef)")
            .eq("circuits.circuitRef", "monza")
            .gte("year", "2015")
            .lte("year", "2020")
            .to_params();

        assert_eq!(params[1], ("circuits.circuitRef".to_string(), "eq.monza".to_string()));
        assert_eq!(params[2], ("year".to_string(), "gte.2015".to_string()));
        assert_eq!(params[3], ("year".to_string(), "lte.2020".to_string()));
    }

    #[test]
    fn test_ilike_prefix_appends_wildcard() {
        let params = Query::from("drivers")
            .ilike_prefix("surname", "sch")
            .order_asc("surname")
            .to_params();

        assert_eq!(params[1], ("surname".to_string(), "ilike.sch%".to_string()));
        assert_eq!(params[2], ("order".to_string(), "surname.asc".to_string()));
    }
}
