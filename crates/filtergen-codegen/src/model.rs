//! Normalized filter document as consumed by the fragment generators.

use filtergen_core::Description;

/// One test case with the settings and measurement results paired to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCase {
    pub test: Description,
    pub settings: Vec<Description>,
    pub measurements: Vec<Description>,
}

/// Every normalized description extracted from one descriptor document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterDocument {
    pub general: Description,
    pub inputs: Vec<Description>,
    /// Document members followed by the template's default members.
    pub members: Vec<Description>,
    pub measurements: Vec<Description>,
    pub tests: Vec<TestCase>,
}

impl FilterDocument {
    /// Upstream filter name.
    pub fn raw_name(&self) -> &str {
        self.general.text("name")
    }

    pub fn template_code_filename(&self) -> &str {
        self.general.text("template_code_filename")
    }
}
