//! Terraform locals document and its HCL writer.

use crate::host_map::HostMap;
use std::fmt;

const INDENT: &str = "  ";

/// Flat attribute map of one provisioned VM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalsHost {
    pub hostname: String,
    pub vm_name: String,
    pub ip_address: String,
    pub gateway: String,
    pub dns: String,
}

impl LocalsHost {
    /// Attributes in emission order.
    pub fn attributes(&self) -> [(&'static str, &str); 5] {
        [
            ("hostname", self.hostname.as_str()),
            ("vm_name", self.vm_name.as_str()),
            ("ip_address", self.ip_address.as_str()),
            ("gateway", self.gateway.as_str()),
            ("dns", self.dns.as_str()),
        ]
    }
}

/// The `locals { masters = {...} workers = {...} }` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalsDocument {
    pub masters: HostMap<LocalsHost>,
    pub workers: HostMap<LocalsHost>,
}

impl LocalsDocument {
    /// Encode as HCL text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LocalsDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "locals {{")?;
        write_group(f, "masters", &self.masters)?;
        write_group(f, "workers", &self.workers)?;
        writeln!(f, "}}")
    }
}

fn write_group(
    f: &mut fmt::Formatter<'_>,
    key: &str,
    hosts: &HostMap<LocalsHost>,
) -> fmt::Result {
    writeln!(f, "{INDENT}{key} = {{")?;
    for (name, host) in hosts.iter() {
        writeln!(f, "{INDENT}{INDENT}{} = {{", quote(name))?;
        for (attr, value) in host.attributes() {
            writeln!(f, "{INDENT}{INDENT}{INDENT}{attr} = {}", quote(value))?;
        }
        writeln!(f, "{INDENT}{INDENT}}}")?;
    }
    writeln!(f, "{INDENT}}}")
}

/// Quote a value as an HCL string literal.
///
/// `${` and `%{` are doubled to `$${` and `%%{` so Terraform reads them as
/// literal text instead of template sequences.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
