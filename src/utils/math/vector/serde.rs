use num::Num;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ZeroSpVec;

impl<N> Serialize for ZeroSpVec<N>
where
    N: Num + Serialize + Copy,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // fields: len, entries
        // entries are (index, value) pairs in ascending index order
        let mut state = serializer.serialize_struct("ZeroSpVec", 2)?;
        state.serialize_field("len", &(self.len as u64))?;
        let entries: Vec<(u64, N)> = self
            .raw_iter()
            .map(|(idx, &val)| (idx as u64, val))
            .collect();
        state.serialize_field("entries", &entries)?;
        state.end()
    }
}

/// Wire shape of a serialized ZeroSpVec
#[derive(Deserialize)]
pub(crate) struct ZeroSpVecData<N> {
    pub len: u64,
    pub entries: Vec<(u64, N)>,
}

impl<'de, N> Deserialize<'de> for ZeroSpVec<N>
where
    N: Num + Deserialize<'de> + Copy,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = ZeroSpVecData::deserialize(deserializer)?;
        ZeroSpVec::try_from_entries(data.len, data.entries).map_err(serde::de::Error::custom)
    }
}
