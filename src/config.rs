//! Generator settings.

use binder_codegen::Type;

pub const GOBY_VM_PACKAGE: &str = "github.com/goby-lang/goby/vm";
pub const GOBY_ERRORS_PACKAGE: &str = "github.com/goby-lang/goby/vm/errors";
pub const DEFAULT_MARKER: &str = "Object";
pub const DEFAULT_RESOURCE_EXT: &str = "gb";
pub const DEFAULT_OUTPUT: &str = "bindings.go";

/// Where the host runtime lives and which result type marks a bindable method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Import path of the VM package providing `Object`, `Thread`, `Method`
    /// and the class registry.
    pub vm_package: String,
    /// Import path of the package holding the error kinds and message formats.
    pub errors_package: String,
    /// Bare name of the result type a method must return to be bound.
    pub marker_type: String,
    /// Extension of the resource file registered next to each class.
    pub resource_ext: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            vm_package: GOBY_VM_PACKAGE.to_string(),
            errors_package: GOBY_ERRORS_PACKAGE.to_string(),
            marker_type: DEFAULT_MARKER.to_string(),
            resource_ext: DEFAULT_RESOURCE_EXT.to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn vm_type(&self, name: &str) -> Type {
        Type::qual(&self.vm_package, name)
    }

    /// `<package>.<ext>`
    pub fn resource_name(&self, package: &str) -> String {
        format!("{package}.{}", self.resource_ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_target_goby() {
        let config = GeneratorConfig::default();
        assert_eq!(config.marker_type, "Object");
        assert_eq!(config.resource_name("game"), "game.gb");
        assert_eq!(
            config.vm_type("Thread"),
            Type::qual("github.com/goby-lang/goby/vm", "Thread")
        );
    }
}
