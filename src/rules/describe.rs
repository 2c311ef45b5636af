//! Short type descriptions for rule messages.

use crate::core::types::TypeDescriptor;

/// Renders types the way naming messages quote them
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMessageDescriber;

impl TypeMessageDescriber {
    /// Create a describer
    pub fn new() -> Self {
        Self
    }

    /// Sorted short names of the named members joined with `|`.
    ///
    /// Falls back to the full rendering when the type names no class.
    pub fn describe_type(&self, descriptor: &TypeDescriptor) -> String {
        let mut short_names: Vec<&str> = Vec::new();
        for member in descriptor.named_members() {
            let short_name = member.name.short_name();
            if !short_names.contains(&short_name) {
                short_names.push(short_name);
            }
        }

        if short_names.is_empty() {
            return descriptor.to_string();
        }

        short_names.sort_unstable();
        short_names.join("|")
    }

    /// Description of the element type of an iterable, or of the type itself
    /// when it is not iterable.
    pub fn describe_iterable_value_type(&self, descriptor: &TypeDescriptor) -> String {
        match descriptor.iterable_value_type() {
            Some(value_type) => self.describe_type(&value_type),
            None => self.describe_type(descriptor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> TypeDescriptor {
        TypeDescriptor::parse(input).unwrap()
    }

    #[test]
    fn test_short_names_sorted_and_deduplicated() {
        let describer = TypeMessageDescriber::new();
        assert_eq!(
            describer.describe_type(&parse("App\\Zeta|Other\\Alpha|null|Vendor\\Alpha")),
            "Alpha|Zeta"
        );
    }

    #[test]
    fn test_falls_back_to_rendering_without_classes() {
        let describer = TypeMessageDescriber::new();
        assert_eq!(describer.describe_type(&parse("int|null")), "int|null");
    }

    #[test]
    fn test_iterable_value_type() {
        let describer = TypeMessageDescriber::new();
        assert_eq!(
            describer.describe_iterable_value_type(&parse("array<int, App\\Node>")),
            "Node"
        );
        assert_eq!(describer.describe_iterable_value_type(&parse("App\\Node")), "Node");
        assert_eq!(describer.describe_iterable_value_type(&parse("list<string>")), "string");
    }
}
