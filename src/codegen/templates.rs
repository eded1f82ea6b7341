//! File templates and placeholder substitution.
//!
//! Placeholders are `{NAME}` tokens made of uppercase letters and underscores.
//! Substitution is a single pass: values are inserted verbatim and never
//! re-scanned, and unknown placeholders are left as written. C++ braces in the
//! templates (`{` followed by a newline) never look like placeholders.

use regex::{Captures, Regex};
use std::collections::HashMap;

/// File name of the base class header, e.g. `Character.h`.
pub const BASECLASS_HEADER: &str = "BASECLASS_HEADER";
/// Module export macro, e.g. `MYGAME_API`.
pub const MODULE_API: &str = "MODULE_API";
/// Name of the class being created.
pub const CLASS_NAME: &str = "CLASS_NAME";
/// Name of the selected base class.
pub const BASE_CLASS: &str = "BASE_CLASS";

/// Header for a plain C++ class. It carries no `UCLASS` marker, so scanning a
/// tree that contains it never indexes the new class.
pub const HEADER_TEMPLATE: &str = r#"#pragma once

#include "CoreMinimal.h"
#include "{BASECLASS_HEADER}"

class {MODULE_API} {CLASS_NAME} : public {BASE_CLASS}
{
public:
    {CLASS_NAME}();
};
"#;

/// Header for a reflected class, picked up by the Unreal Header Tool.
pub const REFLECTED_HEADER_TEMPLATE: &str = r#"#pragma once

#include "CoreMinimal.h"
#include "{BASECLASS_HEADER}"
#include "{CLASS_NAME}.generated.h"

UCLASS()
class {MODULE_API} {CLASS_NAME} : public {BASE_CLASS}
{
    GENERATED_BODY()

public:
    {CLASS_NAME}();
};
"#;

/// Implementation with a default constructor.
pub const IMPL_TEMPLATE: &str = r#"#include "{CLASS_NAME}.h"

{CLASS_NAME}::{CLASS_NAME}()
{
    // Constructor
}
"#;

/// Replaces every known `{NAME}` placeholder in `template`.
#[must_use]
pub fn render(template: &str, values: &HashMap<&str, String>) -> String {
    let placeholder = Regex::new(r"\{([A-Z_]+)\}").unwrap();

    placeholder
        .replace_all(template, |caps: &Captures| {
            values
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
