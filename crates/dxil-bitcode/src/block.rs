//! Block kinds of the bitcode container.
//!
//! Each block kind negotiates a fixed abbreviation id width when it is
//! entered. The widths are part of the contract with existing DXIL readers
//! and must not change.

/// Block kinds this encoder can open.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u32)]
pub enum KnownBlock {
    /// Abbreviations shared by later blocks.
    BlockInfo = 0,
    Module = 8,
    ParamAttr = 9,
    ParamAttrGroup = 10,
    Constants = 11,
    Function = 12,
    ValueSymtab = 14,
    Metadata = 15,
    MetadataAttachment = 16,
    Type = 17,
    UseList = 18,
}

impl KnownBlock {
    /// Every known block kind, in id order.
    pub const ALL: [KnownBlock; 11] = [
        Self::BlockInfo,
        Self::Module,
        Self::ParamAttr,
        Self::ParamAttrGroup,
        Self::Constants,
        Self::Function,
        Self::ValueSymtab,
        Self::Metadata,
        Self::MetadataAttachment,
        Self::Type,
        Self::UseList,
    ];

    /// Convert from a raw block id.
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::BlockInfo),
            8 => Some(Self::Module),
            9 => Some(Self::ParamAttr),
            10 => Some(Self::ParamAttrGroup),
            11 => Some(Self::Constants),
            12 => Some(Self::Function),
            14 => Some(Self::ValueSymtab),
            15 => Some(Self::Metadata),
            16 => Some(Self::MetadataAttachment),
            17 => Some(Self::Type),
            18 => Some(Self::UseList),
            _ => None,
        }
    }

    pub fn id(self) -> u32 {
        self as u32
    }

    /// Abbreviation id width used for items inside this block.
    pub fn abbrev_width(self) -> u32 {
        match self {
            Self::BlockInfo => 2,
            Self::Module => 3,
            Self::ParamAttr => 3,
            Self::ParamAttrGroup => 3,
            Self::Constants => 4,
            Self::Function => 4,
            Self::ValueSymtab => 4,
            Self::Metadata => 3,
            Self::MetadataAttachment => 3,
            Self::Type => 4,
            Self::UseList => 3,
        }
    }

    /// Whether the BLOCKINFO block declares abbreviations for this kind.
    pub fn has_abbrevs(self) -> bool {
        matches!(self, Self::ValueSymtab | Self::Constants | Self::Function)
    }

    /// LLVM's name for the block.
    pub fn name(self) -> &'static str {
        match self {
            Self::BlockInfo => "BLOCKINFO",
            Self::Module => "MODULE_BLOCK",
            Self::ParamAttr => "PARAMATTR_BLOCK",
            Self::ParamAttrGroup => "PARAMATTR_GROUP_BLOCK",
            Self::Constants => "CONSTANTS_BLOCK",
            Self::Function => "FUNCTION_BLOCK",
            Self::ValueSymtab => "VALUE_SYMTAB_BLOCK",
            Self::Metadata => "METADATA_BLOCK",
            Self::MetadataAttachment => "METADATA_ATTACHMENT",
            Self::Type => "TYPE_BLOCK",
            Self::UseList => "USELIST_BLOCK",
        }
    }
}

impl From<KnownBlock> for u32 {
    fn from(block: KnownBlock) -> Self {
        block.id()
    }
}

impl std::fmt::Display for KnownBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
