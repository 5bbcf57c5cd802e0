//! `whilec` Type Checker: structural subtyping for While programs
//!
//! This crate checks a parsed [`WhileFile`] and annotates every expression
//! node with its type. It provides:
//! - Named type resolution and alias cycle rejection
//! - Structural subtyping over primitives, arrays, records and unions
//! - Least upper bounds for array and record literals
//! - Field access on unions of records through record intersection
//! - Flow-typed `var` variables, merged across `if`/`else` branches
//!
//! Checking a declaration stops at its first error. [`check`] stops the
//! whole file there too; [`TypeChecker`] with
//! [`CheckOptions::keep_going`] moves on to the next declaration and
//! collects every diagnostic.
//!
//! # Example
//!
//! ```
//! use whilec_syntax::ast::{Decl, Expr, MethodDecl, Stmt, Type, WhileFile};
//!
//! // void main() { int x = true; }
//! let file = WhileFile::new(vec![Decl::Method(MethodDecl::new(
//!     "main",
//!     vec![],
//!     Type::Void,
//!     vec![Stmt::declare("x", Type::Int, Some(Expr::bool(true)))],
//! ))])
//! .with_filename("main.while");
//!
//! let diagnostic = whilec_typecheck::check(&file).unwrap_err();
//! assert_eq!(
//!     diagnostic.to_string(),
//!     "main.while: error[E0003]: expected type int, found bool"
//! );
//! ```

#![warn(missing_docs)]

pub mod check;
pub mod context;
pub mod error;
pub mod options;
pub mod subtype;
pub mod types;

pub use context::{Environment, MethodSignature, Registry};
pub use error::{Result, TypeError, TypeErrorKind};
pub use options::CheckOptions;
pub use subtype::Subtyping;
pub use types::{KindSet, Type, TypeKind};

use whilec_log::debug;
use whilec_syntax::ast::{Decl, WhileFile};
use whilec_syntax::{Diagnostic, Spanned};

/// Checks every declaration of `file`, stopping at the first error.
///
/// # Errors
///
/// The diagnostic for the first error found.
pub fn check(file: &WhileFile) -> std::result::Result<(), Diagnostic> {
    let checker = TypeChecker::new(file, CheckOptions::default())?;
    for decl in &file.declarations {
        checker
            .check_declaration(decl)
            .map_err(|err| checker.diagnostic(&err))?;
    }
    Ok(())
}

/// Driver holding the registries built for one file.
#[derive(Debug)]
pub struct TypeChecker<'a> {
    file: &'a WhileFile,
    registry: Registry,
    options: CheckOptions,
}

impl<'a> TypeChecker<'a> {
    /// Builds the method and alias registries for `file`.
    ///
    /// # Errors
    ///
    /// A diagnostic for a duplicate method or alias, or a cyclic alias.
    pub fn new(file: &'a WhileFile, options: CheckOptions) -> std::result::Result<Self, Diagnostic> {
        let name = options.file.as_deref().or(file.filename.as_deref());
        let registry = Registry::build(file).map_err(|err| err.to_diagnostic(name))?;
        Ok(Self {
            file,
            registry,
            options,
        })
    }

    /// The registries built from the file.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// File name reported in diagnostics.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.options
            .file
            .as_deref()
            .or(self.file.filename.as_deref())
    }

    /// Checks a single declaration.
    ///
    /// # Errors
    ///
    /// The first type error in `decl`.
    pub fn check_declaration(&self, decl: &Decl) -> Result<()> {
        let result = check::check_decl(&self.registry, decl);
        if let Err(err) = &result {
            debug!(
                "declaration `{}` failed: {} (at {:?})",
                decl.name(),
                err,
                err.span.or(decl.span())
            );
        }
        result
    }

    /// Checks every declaration in order.
    ///
    /// Without `keep_going` the returned list holds only the first
    /// diagnostic; with it, one diagnostic per failing declaration.
    ///
    /// # Errors
    ///
    /// The diagnostics collected, never empty.
    pub fn check_file(&self) -> std::result::Result<(), Vec<Diagnostic>> {
        let mut diagnostics = Vec::new();
        for decl in &self.file.declarations {
            if let Err(err) = self.check_declaration(decl) {
                diagnostics.push(self.diagnostic(&err));
                if !self.options.keep_going {
                    break;
                }
            }
        }
        debug!(
            "checked {} declarations in {}: {} failed",
            self.file.declarations.len(),
            self.file_name().unwrap_or("<input>"),
            diagnostics.len()
        );
        if diagnostics.is_empty() {
            Ok(())
        } else {
            Err(diagnostics)
        }
    }

    /// Converts `err` to a diagnostic for this file.
    #[must_use]
    pub fn diagnostic(&self, err: &TypeError) -> Diagnostic {
        err.to_diagnostic(self.file_name())
    }
}
