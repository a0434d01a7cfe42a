//! Optional Postgres `BIGINT` row representation via `sqlx`.
//!
//! `Identifier` maps onto the same wire type as `i64`, so binary and text
//! protocol decoding both fall out of `i64`'s own `Type`/`Encode`/`Decode`
//! impls. [`Identifier::from_pg_text`] is provided separately for the case
//! where an identifier is stored in a plain text/varchar column as a
//! decimal string rather than a native `BIGINT`.

use sqlx::decode::Decode;
use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::Type;

use crate::codec::CodecError;
use crate::id::Identifier;

impl Type<Postgres> for Identifier {
    fn type_info() -> PgTypeInfo {
        <i64 as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i64 as Type<Postgres>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Postgres> for Identifier {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <i64 as Encode<'q, Postgres>>::encode_by_ref(&self.int64(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for Identifier {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let word = <i64 as Decode<'r, Postgres>>::decode(value)?;
        Ok(Identifier::from_i64(word))
    }
}

impl Identifier {
    /// Parses an identifier out of a decimal-string text column, as an
    /// alternative to the native `BIGINT` mapping above.
    pub fn from_pg_text(text: &str) -> Result<Self, CodecError> {
        Self::from_decimal_string(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_info_matches_i64() {
        assert_eq!(
            <Identifier as Type<Postgres>>::type_info(),
            <i64 as Type<Postgres>>::type_info()
        );
    }

    #[test]
    fn from_pg_text_parses_decimal() {
        assert_eq!(Identifier::from_pg_text("42").unwrap(), Identifier::from_i64(42));
    }

    #[test]
    fn from_pg_text_rejects_garbage() {
        assert!(Identifier::from_pg_text("not a number").is_err());
    }
}
