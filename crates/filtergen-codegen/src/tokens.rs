//! # Token Map
//!
//! Placeholder name → replacement text for one filter document. Built once
//! by [`assemble_tokens`] and rendered into every template of the document;
//! each template uses whichever subset of tokens it needs.

use std::collections::BTreeMap;

use filtergen_core::naming;

use crate::error::CodegenError;
use crate::fragments::{
    filter_body, format_includes, initialization, internal_dispatch, measurement_declaration,
    parameter_declaration, parameter_description, read_parameter, setup_fragments, NOT_AVAILABLE,
};
use crate::model::FilterDocument;
use crate::testcase::{register_test, test_function};
use crate::typemap::TypeMapper;

/// Every token [`assemble_tokens`] produces.
pub const TOKEN_NAMES: &[&str] = &[
    "RawFilterName",
    "ITKModule",
    "FilterName",
    "FilterNameLowerCase",
    "FilterNameExpanded",
    "mdunderline",
    "FilterDescription",
    "FilterOutputType",
    "Parameters",
    "SetupFilterParameters",
    "ReadFilterParameters",
    "InitializationParameters",
    "CheckIntegerEntry",
    "FilterParameterDescription",
    "Filter",
    "FilterInternal",
    "DataCheckInternal",
    "IncludeName",
    "TestsIncludeName",
    "FilterTests",
    "RegisterTests",
];

/// Replacement text keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMap {
    tokens: BTreeMap<String, String>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.tokens.insert(name.into(), text.into());
    }

    /// Append to a token, creating it when absent.
    pub fn append(&mut self, name: &str, text: &str) {
        self.tokens.entry(name.to_string()).or_default().push_str(text);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TokenMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Build the complete token map for one type-checked document.
pub fn assemble_tokens(
    doc: &FilterDocument,
    types: &TypeMapper,
    module: &str,
) -> Result<TokenMap, CodegenError> {
    let general = &doc.general;
    let raw = doc.raw_name();
    let filter_name = naming::filter_name(raw);

    let mut tokens = TokenMap::new();
    for name in TOKEN_NAMES {
        tokens.insert(*name, "");
    }

    tokens.insert("RawFilterName", raw);
    tokens.insert("ITKModule", module);
    tokens.insert("FilterNameLowerCase", filter_name.to_lowercase());
    tokens.insert("FilterNameExpanded", naming::expanded_name(raw));
    tokens.insert("mdunderline", naming::markdown_underline(&filter_name));
    tokens.insert(
        "FilterDescription",
        naming::clean_description(&format!(
            "{}\n\n{}",
            general.render("briefdescription"),
            general.render("detaileddescription")
        )),
    );
    tokens.insert(
        "FilterOutputType",
        if general.is_blank("output_pixel_type") {
            NOT_AVAILABLE.to_string()
        } else {
            general.render("output_pixel_type")
        },
    );

    let mut member_includes = Vec::with_capacity(doc.members.len());
    for member in &doc.members {
        tokens.append("Parameters", &parameter_declaration(member, types)?);
        let setup = setup_fragments(member, &filter_name, types)?;
        tokens.append("SetupFilterParameters", &setup.setup);
        tokens.append("CheckIntegerEntry", &setup.limits);
        member_includes.push(setup.include);
        tokens.append("ReadFilterParameters", &read_parameter(member, types)?);
        tokens.append("InitializationParameters", &initialization(member, types)?);
        tokens.append(
            "FilterParameterDescription",
            &format!("{}\n", parameter_description(member, types)?),
        );
    }
    for measurement in &doc.measurements {
        tokens.append("Parameters", &measurement_declaration(measurement, types)?);
    }

    tokens.insert(
        "Filter",
        filter_body(general, &doc.members, &doc.measurements, types)?,
    );
    tokens.insert("FilterInternal", internal_dispatch(general, "this->filter"));
    tokens.insert("DataCheckInternal", internal_dispatch(general, "this->dataCheck"));

    let header = naming::itk_header(raw);
    let declared = general.list("include_files").iter().filter_map(|v| v.as_str());
    tokens.insert(
        "IncludeName",
        format_includes(
            std::iter::once(header.as_str())
                .chain(declared)
                .chain(member_includes.iter().copied()),
        ),
    );
    tokens.insert("TestsIncludeName", format_includes(member_includes.iter().copied()));

    for case in &doc.tests {
        tokens.append("FilterTests", &test_function(raw, case, types)?);
        tokens.append("RegisterTests", &register_test(raw, case));
    }

    tokens.insert("FilterName", filter_name);
    Ok(tokens)
}
