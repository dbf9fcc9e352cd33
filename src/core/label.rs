//! Human-readable labels for attribute names
//!
//! Handles snake_case, kebab-case, dotted paths and camelCase names

/// Utility for turning attribute names into display labels
pub struct Labeler;

impl Labeler {
    /// Convert an attribute name to a label
    ///
    /// # Examples
    ///
    /// ```
    /// use this_validators::core::label::Labeler;
    ///
    /// assert_eq!(Labeler::humanize("email"), "Email");
    /// assert_eq!(Labeler::humanize("first_name"), "First Name");
    /// assert_eq!(Labeler::humanize("ownerId"), "Owner Id");
    /// assert_eq!(Labeler::humanize("profile.display-name"), "Profile Display Name");
    /// ```
    pub fn humanize(name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }

        let mut words: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut prev_lower = false;

        for c in name.chars() {
            match c {
                '_' | '-' | '.' | ' ' => {
                    if !current.is_empty() {
                        words.push(std::mem::take(&mut current));
                    }
                    prev_lower = false;
                }
                c if c.is_uppercase() && prev_lower => {
                    words.push(std::mem::take(&mut current));
                    current.push(c);
                    prev_lower = false;
                }
                c => {
                    current.push(c);
                    prev_lower = c.is_lowercase() || c.is_ascii_digit();
                }
            }
        }
        if !current.is_empty() {
            words.push(current);
        }

        words
            .iter()
            .map(|w| Self::capitalize(w))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn capitalize(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
