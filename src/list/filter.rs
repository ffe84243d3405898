/// Extracts the text fields a predicate inspects. Absent fields are simply
/// left out of the returned list.
pub type FieldFn<T> = fn(&T) -> Vec<&str>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring containment in any extracted field
    Contains,
    /// Case-insensitive equality with any extracted field
    Exact,
}

pub struct Predicate<T> {
    name: &'static str,
    mode: MatchMode,
    fields: FieldFn<T>,
    needle: Option<String>,
}

impl<T> Predicate<T> {
    pub fn contains(name: &'static str, fields: FieldFn<T>) -> Self {
        Self {
            name,
            mode: MatchMode::Contains,
            fields,
            needle: None,
        }
    }

    pub fn exact(name: &'static str, fields: FieldFn<T>) -> Self {
        Self {
            name,
            mode: MatchMode::Exact,
            fields,
            needle: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    // blank values deactivate the predicate
    fn set_value(&mut self, value: Option<&str>) -> bool {
        let needle = value
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty());
        if needle == self.needle {
            return false;
        }
        self.needle = needle;
        true
    }

    pub fn matches(&self, item: &T) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };

        (self.fields)(item).into_iter().any(|field| {
            let field = field.to_lowercase();
            match self.mode {
                MatchMode::Contains => field.contains(needle),
                MatchMode::Exact => field.trim() == needle,
            }
        })
    }
}

/// Named predicates combined with logical AND
pub struct FilterSet<T> {
    predicates: Vec<Predicate<T>>,
}

impl<T> Default for FilterSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FilterSet<T> {
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    pub fn with(mut self, predicate: Predicate<T>) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Updates the value of the named predicate. Returns whether the value
    /// actually changed; unknown names are ignored.
    pub fn set(&mut self, name: &str, value: Option<&str>) -> bool {
        self.predicates
            .iter_mut()
            .find(|p| p.name() == name)
            .map(|p| p.set_value(value))
            .unwrap_or(false)
    }

    pub fn is_active(&self) -> bool {
        self.predicates.iter().any(|p| p.is_active())
    }

    pub fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|p| p.matches(item))
    }

    /// Keeps the input order
    pub fn apply<'a>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        title: String,
        state: Option<String>,
        field: String,
    }

    fn row(title: &str, state: Option<&str>, field: &str) -> Row {
        Row {
            title: title.into(),
            state: state.map(Into::into),
            field: field.into(),
        }
    }

    fn title(r: &Row) -> Vec<&str> {
        vec![r.title.as_str()]
    }

    fn title_or_state(r: &Row) -> Vec<&str> {
        let mut out = vec![r.title.as_str()];
        out.extend(r.state.as_deref());
        out
    }

    fn field(r: &Row) -> Vec<&str> {
        vec![r.field.as_str()]
    }

    fn rows() -> Vec<Row> {
        vec![
            row("Lease dispute in Perth", Some("WA"), "Mediation"),
            row("Family business conflict", Some("NSW"), "Arbitration"),
            row("Construction delay", None, "mediation"),
            row("Employment contract", Some("VIC"), "Negotiation"),
        ]
    }

    #[test]
    fn test_empty_filter_keeps_everything_in_order() {
        let items = rows();
        let filters = FilterSet::new().with(Predicate::contains("search", title));
        let out = filters.apply(&items);
        assert_eq!(out.len(), 4);
        assert_eq!(out[0].title, "Lease dispute in Perth");
        assert_eq!(out[3].title, "Employment contract");
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let items = rows();
        let mut filters = FilterSet::new().with(Predicate::contains("search", title));
        assert!(filters.set("search", Some("DISPUTE")));
        let out = filters.apply(&items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Lease dispute in Perth");
    }

    #[test]
    fn test_contains_spans_multiple_fields() {
        let items = rows();
        let mut filters = FilterSet::new().with(Predicate::contains("search", title_or_state));
        filters.set("search", Some("nsw"));
        let out = filters.apply(&items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Family business conflict");
    }

    #[test]
    fn test_exact_does_not_match_substrings() {
        let items = rows();
        let mut filters = FilterSet::new().with(Predicate::exact("field", field));
        filters.set("field", Some("Mediation"));
        assert_eq!(filters.apply(&items).len(), 2);

        filters.set("field", Some("Media"));
        assert!(filters.apply(&items).is_empty());
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let items = rows();
        let mut filters = FilterSet::new()
            .with(Predicate::contains("search", title_or_state))
            .with(Predicate::exact("field", field));
        filters.set("search", Some("on"));
        filters.set("field", Some("mediation"));

        let out = filters.apply(&items);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Construction delay");
        for item in &out {
            assert!(filters.matches(item));
        }
    }

    #[test]
    fn test_blank_value_is_vacuous() {
        let items = rows();
        let mut filters = FilterSet::new().with(Predicate::contains("search", title));
        filters.set("search", Some("perth"));
        assert!(filters.is_active());

        assert!(filters.set("search", Some("   ")));
        assert!(!filters.is_active());
        assert_eq!(filters.apply(&items).len(), 4);
    }

    #[test]
    fn test_set_reports_changes_only() {
        let mut filters: FilterSet<Row> =
            FilterSet::new().with(Predicate::contains("search", title));
        assert!(filters.set("search", Some("a")));
        assert!(!filters.set("search", Some("A")));
        assert!(!filters.set("missing", Some("a")));
        assert!(filters.is_active());
    }

    #[test]
    fn test_result_is_subset_for_every_combination() {
        let items = rows();
        let needles = [None, Some("e"), Some("dispute"), Some("zzz")];
        let fields = [None, Some("Mediation"), Some("Negotiation")];

        for needle in needles {
            for f in fields {
                let mut filters = FilterSet::new()
                    .with(Predicate::contains("search", title_or_state))
                    .with(Predicate::exact("field", field));
                filters.set("search", needle);
                filters.set("field", f);

                let out = filters.apply(&items);
                assert!(out.len() <= items.len());
                for item in out {
                    assert!(items.iter().any(|i| std::ptr::eq(i, item)));
                    if let Some(n) = needle {
                        assert!(title_or_state(item)
                            .iter()
                            .any(|v| v.to_lowercase().contains(n)));
                    }
                    if let Some(f) = f {
                        assert!(item.field.eq_ignore_ascii_case(f));
                    }
                }
            }
        }
    }
}
