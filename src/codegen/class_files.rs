//! Header/implementation rendering and placement.

use crate::codegen::templates::{
    self, BASECLASS_HEADER, BASE_CLASS, CLASS_NAME, HEADER_TEMPLATE, IMPL_TEMPLATE, MODULE_API,
    REFLECTED_HEADER_TEMPLATE,
};
use crate::constants::DEFAULT_MODULE_API;
use crate::error::Result;
use crate::models::{GeneratedFilePair, Placement};
use crate::services::{ClassIndex, PathResolver};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Settings that shape generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Export macro placed before the class name
    pub module_api: String,
    /// Use the reflected (`UCLASS`) header template
    pub reflected: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            module_api: DEFAULT_MODULE_API.to_string(),
            reflected: false,
        }
    }
}

/// Renders the file pair for a new class. Performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct FileGenerator {
    options: GenerateOptions,
}

impl FileGenerator {
    /// Creates a generator with the given options.
    #[must_use]
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    #[must_use]
    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Computes paths and contents for `new_class_name` deriving from `base_class_name`.
    ///
    /// `destination_dir` is expected to lie inside `project_root`.
    ///
    /// - `Public`: header in `destination_dir`, implementation in the matching
    ///   `Private` directory below `project_root` (see
    ///   [`PathResolver::private_counterpart`])
    /// - `Private` / `Unclassified`: both in `destination_dir`
    ///
    /// The header includes the base class's header by file name and names the
    /// base with its indexed spelling.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ClassGenError::UnknownBaseClass`] if the base is not indexed.
    pub fn generate(
        &self,
        project_root: &Path,
        destination_dir: &Path,
        base_class_name: &str,
        new_class_name: &str,
        index: &ClassIndex,
        placement: Placement,
    ) -> Result<GeneratedFilePair> {
        let base = index.lookup(base_class_name)?;

        let header_dir = destination_dir.to_path_buf();
        let impl_dir = match placement {
            Placement::Public => PathResolver::private_counterpart(project_root, destination_dir)
                .unwrap_or_else(|| {
                    warn!(
                        "No Public segment in {}; keeping the implementation next to the header",
                        destination_dir.display()
                    );
                    destination_dir.to_path_buf()
                }),
            Placement::Private | Placement::Unclassified => destination_dir.to_path_buf(),
        };

        let mut values = HashMap::new();
        values.insert(BASECLASS_HEADER, base.header_file_name());
        values.insert(MODULE_API, self.options.module_api.clone());
        values.insert(CLASS_NAME, new_class_name.to_string());
        values.insert(BASE_CLASS, base.class_name.clone());

        let header_template = if self.options.reflected {
            REFLECTED_HEADER_TEMPLATE
        } else {
            HEADER_TEMPLATE
        };

        Ok(GeneratedFilePair {
            header_path: header_dir.join(format!("{new_class_name}.h")),
            header_content: templates::render(header_template, &values),
            impl_path: impl_dir.join(format!("{new_class_name}.cpp")),
            impl_content: templates::render(IMPL_TEMPLATE, &values),
        })
    }
}
