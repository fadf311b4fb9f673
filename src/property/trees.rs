use super::descriptor::{CUSTOM_PATH_PREFIX, PropertyDescriptor, find_by_path};

/// Borrowed view of every property tree in a mapping session.
///
/// Connections reference properties by path; this resolves those paths
/// back to descriptors.
#[derive(Debug, Clone, Copy)]
pub struct PropertyTrees<'a> {
    pub input: &'a [PropertyDescriptor],
    pub output: &'a [PropertyDescriptor],
    /// User-added literal producers. They sit on the output side.
    pub custom: &'a [PropertyDescriptor],
}

impl<'a> PropertyTrees<'a> {
    pub fn new(
        input: &'a [PropertyDescriptor],
        output: &'a [PropertyDescriptor],
        custom: &'a [PropertyDescriptor],
    ) -> Self {
        Self {
            input,
            output,
            custom,
        }
    }

    pub fn input(&self, path: &str) -> Option<&'a PropertyDescriptor> {
        find_by_path(self.input, path)
    }

    pub fn output(&self, path: &str, is_custom: bool) -> Option<&'a PropertyDescriptor> {
        if is_custom {
            self.custom.iter().find(|property| property.path == path)
        } else {
            find_by_path(self.output, path)
        }
    }

    /// Resolves an output-side path, routing custom paths to the custom list.
    pub fn output_or_custom(&self, path: &str) -> Option<&'a PropertyDescriptor> {
        self.output(path, path.starts_with(CUSTOM_PATH_PREFIX))
    }
}
