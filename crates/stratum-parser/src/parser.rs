//! The spec grammar (§4.1): an unnormalized spec tree built from `nom`
//! combinators over the raw tokens in [`crate::lexer`].
//!
//! Parsing happens in two passes. First, `nom` turns the text into a
//! [`RawSpec`] — a plain, untyped AST that mirrors the grammar directly
//! (one node per `spec`, one [`Clause`] per postfix modifier, a `Vec` of
//! `^`-prefixed dependency nodes). Second, [`build`] walks that AST and
//! turns it into a real [`stratum_spec::Spec`], which is where every
//! per-spec uniqueness rule (§4.1's "duplicate ... raised as typed errors")
//! actually fires — those checks already live on `Spec`/`VariantMap`
//! (`add_dependency`, `add_variant`, `set_compiler`, `set_architecture`),
//! so the builder just calls them and lets their errors propagate. Id
//! validity (`.` only legal in version ids) is checked in this same pass,
//! matching spec.md's "the parser validates this post-hoc at every id it
//! accepts".

use nom::IResult;
use nom::branch::alt;
use nom::character::complete::char;
use nom::combinator::{all_consuming, opt};
use nom::error::ParseError;
use nom::multi::{many0, many1};
use nom::sequence::{pair, preceded};

use stratum_error::{Error, Result};
use stratum_foundation::{Compiler, Polarity, Variant, VersionList, is_valid_id};
use stratum_spec::Spec;

use crate::lexer::{raw_id, raw_version_list, ws};

/// One postfix modifier recognized after a spec's name, still holding raw
/// token text — interpreting that text (parsing a version list, validating
/// an id) is [`build`]'s job, not the grammar's.
#[derive(Debug)]
enum Clause<'a> {
    Versions(&'a str),
    VariantEnabled(&'a str),
    VariantDisabled(&'a str),
    Compiler(&'a str, Option<&'a str>),
    Architecture(&'a str),
}

/// The untyped parse tree for one `spec` production, `^`-prefixed
/// dependencies included (§4.6: "the parser hangs all deps off the root" —
/// every `^spec` encountered while reading this node's clauses becomes a
/// direct dependency of *this* node, never of a previously-read sibling
/// dependency).
#[derive(Debug)]
struct RawSpec<'a> {
    name: &'a str,
    clauses: Vec<Clause<'a>>,
    deps: Vec<RawSpec<'a>>,
}

fn versions_clause<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Clause<'a>, E> {
    let (input, text) = preceded(char('@'), raw_version_list)(input)?;
    Ok((input, Clause::Versions(text)))
}

fn variant_enabled<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Clause<'a>, E> {
    let (input, name) = preceded(char('+'), raw_id)(input)?;
    Ok((input, Clause::VariantEnabled(name)))
}

fn variant_disabled<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Clause<'a>, E> {
    let (input, name) = preceded(alt((char('~'), char('-'))), raw_id)(input)?;
    Ok((input, Clause::VariantDisabled(name)))
}

/// `%compiler[@version-list]`: the version list right after a compiler
/// name binds to the compiler, not the package (§4.1's `@` disambiguation
/// rule) — that's encoded here by consuming it as part of this same
/// production, before the outer clause loop gets another chance at `@`.
fn compiler_clause<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Clause<'a>, E> {
    let (input, (name, versions)) = preceded(
        char('%'),
        pair(raw_id, opt(preceded(char('@'), raw_version_list))),
    )(input)?;
    Ok((input, Clause::Compiler(name, versions)))
}

fn architecture_clause<'a, E: ParseError<&'a str>>(
    input: &'a str,
) -> IResult<&'a str, Clause<'a>, E> {
    let (input, arch) = preceded(char('='), raw_id)(input)?;
    Ok((input, Clause::Architecture(arch)))
}

fn clause<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Clause<'a>, E> {
    ws(alt((
        versions_clause,
        variant_enabled,
        variant_disabled,
        compiler_clause,
        architecture_clause,
    )))(input)
}

/// `id { clause }`, without the `^`-dependency tail — just the name and
/// its direct modifiers.
fn spec_head<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, RawSpec<'a>, E> {
    let (input, name) = ws(raw_id)(input)?;
    let (input, clauses) = many0(clause)(input)?;
    Ok((
        input,
        RawSpec {
            name,
            clauses,
            deps: Vec::new(),
        },
    ))
}

/// `spec { "^" spec }`: a head plus zero or more `^`-prefixed dependency
/// specs, each of which is itself a full `spec_head` (it may carry its own
/// `@`/`+`/`%`/`=` clauses — scenario 1's `^openmpi @1.2:1.4 +debug`).
fn spec<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, RawSpec<'a>, E> {
    let (input, mut head) = spec_head(input)?;
    let (input, deps) = many0(preceded(ws(char('^')), spec_head))(input)?;
    head.deps = deps;
    Ok((input, head))
}

/// A whitespace-separated list of independent specs (§6: `find`'s
/// `query-specs…`), each with its own `^`-dependency tail.
fn spec_list<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, Vec<RawSpec<'a>>, E> {
    many1(ws(spec))(input)
}

/// Turn a raw version-list token into a [`VersionList`], surfacing a
/// malformed token as [`Error::SpecParseError`].
fn versions(text: &str) -> Result<VersionList> {
    text.parse()
}

fn validate_id(name: &str) -> Result<()> {
    if is_valid_id(name) {
        Ok(())
    } else {
        Err(Error::SpecParseError(format!(
            "'{name}' is not a valid identifier (the '.' character is reserved for version ids)"
        )))
    }
}

/// Turn one [`RawSpec`] (and its dependency subtree) into a real
/// [`Spec`] node, applying every field in clause order. Each `Spec`/
/// `VariantMap` setter already raises the right typed
/// `Duplicate{Variant,Compiler,Architecture}`/`DuplicateDependency` error
/// on a second occurrence (§4.1), so this function just calls them and
/// propagates.
fn build(raw: &RawSpec<'_>) -> Result<Spec> {
    validate_id(raw.name)?;
    let spec = Spec::new(raw.name);

    for clause in &raw.clauses {
        match clause {
            Clause::Versions(text) => {
                for range in versions(text)?.ranges() {
                    spec.add_version_constraint(range.clone());
                }
            }
            Clause::VariantEnabled(name) => {
                validate_id(name)?;
                spec.add_variant(Variant::new(*name, Polarity::Enabled))?;
            }
            Clause::VariantDisabled(name) => {
                validate_id(name)?;
                spec.add_variant(Variant::new(*name, Polarity::Disabled))?;
            }
            Clause::Compiler(name, version_text) => {
                validate_id(name)?;
                let compiler = match version_text {
                    Some(text) => Compiler::with_versions(*name, versions(text)?),
                    None => Compiler::new(*name),
                };
                spec.set_compiler(compiler)?;
            }
            Clause::Architecture(name) => {
                validate_id(name)?;
                spec.set_architecture(*name)?;
            }
        }
    }

    for dep_raw in &raw.deps {
        let dep = build(dep_raw)?;
        spec.add_dependency(dep)?;
    }

    Ok(spec)
}

/// Parse one spec with its full `^`-dependency tail, e.g.
/// `"mpileaks ^openmpi @1.2:1.4 +debug %intel @12.1 =bgqos_0"`.
pub fn parse_spec(input: &str) -> Result<Spec> {
    let trimmed = input.trim();
    match all_consuming(spec::<nom_supreme::error::ErrorTree<_>>)(trimmed) {
        Ok((_, raw)) => build(&raw),
        Err(tree) => Err(parse_failure(trimmed, tree, spec::<nom::error::Error<_>>)),
    }
}

/// Parse a whitespace-separated list of independent specs (§6's
/// `query-specs…`), e.g. for `find`'s OR-semantics filter list.
pub fn parse_spec_list(input: &str) -> Result<Vec<Spec>> {
    let trimmed = input.trim();
    match all_consuming(spec_list::<nom_supreme::error::ErrorTree<_>>)(trimmed) {
        Ok((_, raws)) => raws.iter().map(build).collect(),
        Err(tree) => Err(parse_failure(trimmed, tree, spec_list::<nom::error::Error<_>>)),
    }
}

/// Convert a syntax failure into [`Error::Parse`]/[`ParseFailure`]. `tree`
/// (an `ErrorTree`'s `nom::Err`) supplies the human-readable message via
/// its `Display` impl; the byte offset is recovered by re-running the same
/// grammar with plain `nom::error::Error`, whose `input` field is a
/// literal suffix of the original — every combinator here is a zero-copy
/// `&str` slice op, so pointer arithmetic between the two gives an exact
/// position.
fn parse_failure<'a, O>(
    input: &'a str,
    tree: nom::Err<nom_supreme::error::ErrorTree<&'a str>>,
    plain_parser: impl Fn(&'a str) -> IResult<&'a str, O, nom::error::Error<&'a str>>,
) -> Error {
    let position = match all_consuming(plain_parser)(input) {
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => input.len() - e.input.len(),
        _ => input.len(),
    };
    let reason = match tree {
        nom::Err::Error(e) | nom::Err::Failure(e) => e.to_string(),
        nom::Err::Incomplete(_) => "incomplete spec".to_string(),
    };
    Error::Parse(stratum_error::ParseFailure {
        input: input.to_string(),
        position,
        reason,
    })
}

#[cfg(test)]
#[path = "./parser_test.rs"]
mod parser_test;
