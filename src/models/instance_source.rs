//! Instance source details, polymorphic on `sourceType`

use crate::error::Result;
use crate::model::{
    hydrate_polymorphic, DynModel, FromWire, Hydrator, KeyStyle, Model, Polymorphic, ToPlain,
    TypeDesc,
};
use serde_json::{Map, Value};

crate::wire_model! {
    /// Source details whose `sourceType` this client does not recognize
    pub struct InstanceSourceDetailsBase {
        source_type: String => "sourceType",
    }
}

crate::wire_model! {
    pub struct InstanceSourceViaImageDetails {
        source_type: String => "sourceType",
        image_id: String => "imageId",
        boot_volume_size_in_gbs: i64 => "bootVolumeSizeInGBs",
        boot_volume_vpus_per_gb: i64 => "bootVolumeVpusPerGB",
        kms_key_id: String => "kmsKeyId",
    }
}

crate::wire_model! {
    pub struct InstanceSourceViaBootVolumeDetails {
        source_type: String => "sourceType",
        boot_volume_id: String => "bootVolumeId",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceSourceKind {
    Image,
    BootVolume,
    Base,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstanceSourceDetails {
    Image(InstanceSourceViaImageDetails),
    BootVolume(InstanceSourceViaBootVolumeDetails),
    Unknown(InstanceSourceDetailsBase),
}

impl Polymorphic for InstanceSourceDetails {
    type Kind = InstanceSourceKind;

    const FAMILY: &'static str = "InstanceSourceDetails";
    const DISCRIMINATOR: &'static str = "sourceType";
    const DISCRIMINATOR_LOCAL: &'static str = "source_type";
    const SUBTYPES: &'static [(&'static str, InstanceSourceKind)] = &[
        ("image", InstanceSourceKind::Image),
        ("bootVolume", InstanceSourceKind::BootVolume),
    ];
    const BASE: InstanceSourceKind = InstanceSourceKind::Base;

    fn hydrate_kind(kind: InstanceSourceKind, raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        Ok(match kind {
            InstanceSourceKind::Image => Self::Image(cx.hydrate(raw)?),
            InstanceSourceKind::BootVolume => Self::BootVolume(cx.hydrate(raw)?),
            InstanceSourceKind::Base => Self::Unknown(cx.hydrate(raw)?),
        })
    }

    fn kind(&self) -> InstanceSourceKind {
        match self {
            Self::Image(_) => InstanceSourceKind::Image,
            Self::BootVolume(_) => InstanceSourceKind::BootVolume,
            Self::Unknown(_) => InstanceSourceKind::Base,
        }
    }

    fn subtype_name(kind: InstanceSourceKind) -> &'static str {
        match kind {
            InstanceSourceKind::Image => InstanceSourceViaImageDetails::NAME,
            InstanceSourceKind::BootVolume => InstanceSourceViaBootVolumeDetails::NAME,
            InstanceSourceKind::Base => InstanceSourceDetailsBase::NAME,
        }
    }
}

impl InstanceSourceDetails {
    fn plain_map(&self, keys: KeyStyle) -> Map<String, Value> {
        match self {
            Self::Image(details) => details.plain_map(keys),
            Self::BootVolume(details) => details.plain_map(keys),
            Self::Unknown(details) => details.plain_map(keys),
        }
    }
}

impl FromWire for InstanceSourceDetails {
    fn describe() -> TypeDesc {
        TypeDesc::Family {
            name: Self::FAMILY,
            discriminator: Self::DISCRIMINATOR,
        }
    }

    fn from_wire(raw: &Value, cx: &mut Hydrator<'_>) -> Result<Self> {
        hydrate_polymorphic(raw, cx)
    }
}

impl ToPlain for InstanceSourceDetails {
    fn to_plain(&self, keys: KeyStyle) -> Value {
        Value::Object(self.plain_map(keys))
    }
}

impl DynModel for InstanceSourceDetails {
    fn type_name(&self) -> &'static str {
        Self::subtype_name(self.kind())
    }

    fn to_plain_hash(&self) -> Map<String, Value> {
        self.plain_map(KeyStyle::Local)
    }

    fn to_plain_wire(&self) -> Map<String, Value> {
        self.plain_map(KeyStyle::Wire)
    }
}
