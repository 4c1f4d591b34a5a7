//! Token-level combinators shared by [`crate::parser`] (§4.1).
//!
//! There is exactly one id grammar (`[A-Za-z0-9_][A-Za-z0-9_.-]*`), reused
//! for package/variant/compiler/architecture names and for version ids
//! alike; the `.` restriction is enforced post-hoc by the caller, not by
//! the lexer, matching spec.md's "context sensitivity" note. The lexer is
//! greedy: it has no notion of "this `-` starts a new clause" and will
//! happily fold a literal `-` into the id it's in the middle of reading —
//! disambiguation is the caller's job (whitespace, or `~` for a disabled
//! variant).

use nom::IResult;
use nom::bytes::complete::take_while1;
use nom::character::complete::multispace0;
use nom::error::ParseError;
use nom::sequence::preceded;

/// One raw id token: any run of `[A-Za-z0-9_.-]`, without checking that the
/// first character is non-`.`/non-`-` or that `.` is only used where
/// legal — both are validated by the builder once the token has a known
/// role (name vs. version).
pub(crate) fn raw_id<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    take_while1(|c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))(input)
}

/// A version-list token: one or more [`raw_id`] pieces joined by `:` or
/// `,`, e.g. `1.2:1.4,1.6`. The structural separators are part of the
/// token so the whole thing can be handed to
/// [`stratum_foundation::VersionList`]'s `FromStr` impl in one piece.
pub(crate) fn raw_version_list<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
where
    E: ParseError<&'a str>,
{
    take_while1(|c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | ','))(
        input,
    )
}

/// Skip leading whitespace between specs (`mpileaks ^openmpi`, not
/// `mpileaks^openmpi` — both are legal, the grammar has no mandatory
/// separator).
pub(crate) fn ws<'a, F, O, E>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O, E>
where
    F: FnMut(&'a str) -> IResult<&'a str, O, E>,
    E: ParseError<&'a str>,
{
    preceded(multispace0, inner)
}
