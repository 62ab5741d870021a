//! Builds read descriptions for the remote store and renders them as PostgREST query parameters.

use crate::query::params::FilterValue;
use serde_json::Value;

/// A related row pulled into each result row through a foreign-key column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Embed {
    /// Key the related object is returned under.
    pub alias: &'static str,
    pub table: &'static str,
    /// Column on the source row holding the related row's `id`.
    pub foreign_key: &'static str,
    pub columns: &'static [&'static str],
    /// When set, the related fields are hoisted into the parent as `{prefix}_{column}`.
    pub flatten: Option<&'static str>,
}

impl Embed {
    /// `alias:table!foreign_key(col,...)`
    fn select_fragment(&self) -> String {
        format!(
            "{}:{}!{}({})",
            self.alias,
            self.table,
            self.foreign_key,
            self.columns.join(",")
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub column: &'static str,
    pub value: Value,
}

/// Equality-filtered read of one table with optional embeds.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectQuery {
    pub table: &'static str,
    /// Empty means every column.
    pub columns: Vec<&'static str>,
    pub embeds: Vec<Embed>,
    pub filters: Vec<Filter>,
}

impl SelectQuery {
    pub fn from_table(table: &'static str) -> Self {
        SelectQuery {
            table,
            columns: Vec::new(),
            embeds: Vec::new(),
            filters: Vec::new(),
        }
    }

    pub fn columns(mut self, columns: &[&'static str]) -> Self {
        self.columns.extend_from_slice(columns);
        self
    }

    pub fn embeds(mut self, embeds: &[Embed]) -> Self {
        self.embeds.extend_from_slice(embeds);
        self
    }

    pub fn eq(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column,
            value: value.into(),
        });
        self
    }

    /// The `select=` expression: base columns (or `*`) followed by embed fragments.
    pub fn select_expr(&self) -> String {
        let mut parts: Vec<String> = if self.columns.is_empty() {
            vec!["*".to_string()]
        } else {
            self.columns.iter().map(|c| c.to_string()).collect()
        };
        parts.extend(self.embeds.iter().map(Embed::select_fragment));
        parts.join(",")
    }

    /// Query-string pairs, `select` first, then one `column=eq.value` pair per filter.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(1 + self.filters.len());
        out.push(("select".to_string(), self.select_expr()));
        for f in &self.filters {
            out.push((f.column.to_string(), FilterValue::from_json(&f.value).render_eq()));
        }
        out
    }
}
