//! Exhaustive error-code taxonomy.
//!
//! Each variant is a distinct, stable code, grouped by family (syntax /
//! identifier / keys-unique / constraints / references / conditions /
//! cardinality / internal) purely for readability; the enum itself is
//! flat, matching how `tsz_common::diagnostics` keeps a flat `u32` code
//! space rather than a family-tagged one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ErrorCode {
    // --- Syntax (path micro-parsers) ---
    /// Invalid character at the reported offset.
    PathInchar,
    /// Invalid module-name prefix syntax.
    PathInmod,
    /// Referenced module/prefix does not exist.
    PathMissmod,
    /// Invalid node-identifier.
    PathInnode,
    /// Invalid predicate key syntax.
    PathInkey,
    /// Predicate is missing its key.
    PathMisskey,
    /// Node already exists (duplicate augment/refine target segment).
    PathExists,
    /// Missing parent reference (`../`) where one was required.
    PathMisspar,

    // --- Identifier ---
    /// Invalid identifier (fails the `identifier` grammar).
    Inid,
    /// Invalid module name.
    Inmod,
    /// Invalid statement.
    Instmt,
    /// Invalid child statement for this context.
    Inchildstmt,
    /// Required statement missing.
    Missstmt,
    /// Required child statement missing.
    Misschildstmt,
    /// Statement argument missing.
    Missarg,
    /// Statement given more times than allowed.
    Toomany,
    /// Duplicate identifier within a kind-group.
    Dupid,

    // --- Keys / unique ---
    /// List key is not a leaf of the list itself.
    KeyNleaf,
    /// List key leaf has disallowed (`empty`) type.
    KeyType,
    /// List key's `config` does not match the list's `config`.
    KeyConfig,
    /// Required list key missing.
    KeyMiss,
    /// Duplicate list key name.
    KeyDup,
    /// `unique` path set is not unique across list entries.
    Nouniq,

    // --- Constraints ---
    /// Invalid argument value.
    Inarg,
    /// Invalid value for this context.
    Inval,
    /// Range/length/pattern restriction is not satisfiable (family code).
    Noconstr,
    /// Duplicate enum value.
    EnumDupval,
    /// Duplicate enum name.
    EnumDupname,
    /// Enum name has disallowed leading/trailing whitespace (YANG 1.1).
    EnumWs,
    /// Duplicate bit position.
    BitsDupval,
    /// Duplicate bit name.
    BitsDupname,

    // --- References ---
    /// Generic unresolved reference (kind subsumed by more specific codes
    /// below when available).
    Inresolv,
    /// Reference target could not be found at all.
    Noresolv,
    /// `current` item references a `deprecated`/`obsolete` item.
    Instatus,
    /// Leafref target invalid or unresolved.
    Noleafref,
    /// `require-instance` violated.
    Noreqins,
    /// `when` could not be evaluated (cyclic dependency on its own subtree).
    Inwhen,

    // --- Conditions ---
    /// `must` condition registration/evaluation failure.
    Nomust,
    /// `when` condition registration/evaluation failure.
    Nowhen,
    /// Mandatory node inside a mandatory-forbidding `choice`/`case` context.
    Nomandchoice,

    // --- Cardinality ---
    /// `min-elements` violated.
    Nomin,
    /// `max-elements` violated.
    Nomax,
    /// Duplicate `leaf-list` entry where `unique` values are required.
    Dupleaflist,
    /// Duplicate `list` entry (same key tuple).
    Duplist,
    /// Multiple `case`s of the same `choice` supplied data.
    Mcasedata,

    /// Reserved code for invariant violations the resolver itself detects
    /// (arena corruption, a worklist item anchored to a freed node). Never
    /// caused by user input; distinguishes "the schema is wrong" from "the
    /// resolver has a bug".
    Internal,
}

impl ErrorCode {
    /// The stable short code string, as it would appear in a diagnostic
    /// feed.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PathInchar => "PATH_INCHAR",
            Self::PathInmod => "PATH_INMOD",
            Self::PathMissmod => "PATH_MISSMOD",
            Self::PathInnode => "PATH_INNODE",
            Self::PathInkey => "PATH_INKEY",
            Self::PathMisskey => "PATH_MISSKEY",
            Self::PathExists => "PATH_EXISTS",
            Self::PathMisspar => "PATH_MISSPAR",
            Self::Inid => "INID",
            Self::Inmod => "INMOD",
            Self::Instmt => "INSTMT",
            Self::Inchildstmt => "INCHILDSTMT",
            Self::Missstmt => "MISSSTMT",
            Self::Misschildstmt => "MISSCHILDSTMT",
            Self::Missarg => "MISSARG",
            Self::Toomany => "TOOMANY",
            Self::Dupid => "DUPID",
            Self::KeyNleaf => "KEY_NLEAF",
            Self::KeyType => "KEY_TYPE",
            Self::KeyConfig => "KEY_CONFIG",
            Self::KeyMiss => "KEY_MISS",
            Self::KeyDup => "KEY_DUP",
            Self::Nouniq => "NOUNIQ",
            Self::Inarg => "INARG",
            Self::Inval => "INVAL",
            Self::Noconstr => "NOCONSTR",
            Self::EnumDupval => "ENUM_DUPVAL",
            Self::EnumDupname => "ENUM_DUPNAME",
            Self::EnumWs => "ENUM_WS",
            Self::BitsDupval => "BITS_DUPVAL",
            Self::BitsDupname => "BITS_DUPNAME",
            Self::Inresolv => "INRESOLV",
            Self::Noresolv => "NORESOLV",
            Self::Instatus => "INSTATUS",
            Self::Noleafref => "NOLEAFREF",
            Self::Noreqins => "NOREQINS",
            Self::Inwhen => "INWHEN",
            Self::Nomust => "NOMUST",
            Self::Nowhen => "NOWHEN",
            Self::Nomandchoice => "NOMANDCHOICE",
            Self::Nomin => "NOMIN",
            Self::Nomax => "NOMAX",
            Self::Dupleaflist => "DUPLEAFLIST",
            Self::Duplist => "DUPLIST",
            Self::Mcasedata => "MCASEDATA",
            Self::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
