use serde::Deserialize;

// the trivia frontend is not consistent about ids, `previous_questions` may
// arrive as `[1, 2]` or as `["1", "2"]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawId")]
pub struct LenientId(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl TryFrom<RawId> for LenientId {
    type Error = String;

    fn try_from(value: RawId) -> Result<Self, Self::Error> {
        match value {
            RawId::Number(v) => Ok(LenientId(v)),
            RawId::Text(text) => match text.trim().parse::<i64>() {
                Ok(v) => Ok(LenientId(v)),
                Err(_) => Err(format!("Wrong value {text}, can not parse to i64")),
            },
        }
    }
}
