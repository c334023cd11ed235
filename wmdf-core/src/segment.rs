//! Segment identifiers and segment payloads.
//!
//! Every chunk after the color block is introduced by a single ASCII id.
//! `SegmentId` is the static capability table for those ids: which ones the
//! converter recognizes, which of those it actually decodes for WIF export,
//! and a human-readable description for structural reports.

use std::fmt;

/// A recognized segment id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SegmentId {
    /// `C`: colorway table.
    Colorway,
    /// `M`: colorway mapping (M form).
    ColorwayMap,
    /// `A`: major/minor/accent chip assignment.
    MajorMinorAccent,
    /// `Q`: color palette (newest layout).
    ColorPalette,
    /// `D`: file format code, tracks the application version.
    Version,
    /// `g`: author's name, or controls.
    Author,
    /// `n`: draft name.
    Name,
    /// `p`: pegplan (liftplan).
    Pegplan,
    /// `q`: weft colors.
    WeftColors,
    /// `r`: treadling.
    Treadling,
    /// `s`: warp colors.
    WarpColors,
    /// `t`: threading.
    Threading,
    /// `h`: old-style threading.
    OldThreading,
    /// `u`: tieup.
    Tieup,
    /// `Y`: public remarks.
    PublicRemarks,
    /// `*`: private remarks.
    PrivateRemarks,
    /// `R`: tromp-as-writ type.
    TrompType,
    /// `T`: color tromp-as-writ.
    ColorTromp,
    /// `e`: ends per unit.
    EndsPerUnit,
    /// `f`: picks per unit.
    PicksPerUnit,
    /// `E`: reed.
    Reed,
    /// `K`: denting.
    Denting,
    /// `L`: selvages.
    Selvages,
    /// `P`: colorway (newer layout).
    ColorwayNew,
    /// `c`: colorway (old layout).
    ColorwayOld,
    /// `9`: user's name.
    UserName,
    /// `b`: purpose unknown.
    Unknown,
    /// `B`: print options.
    PrintOptions,
    /// `d`: stop motion.
    StopMotion,
    /// `J`: fabric size.
    FabricSize,
    /// `k`: dobby pick number.
    DobbyPick,
    /// `m`: palette mask.
    PaletteMask,
    /// `N`: beaming (see also `S`).
    Beaming,
    /// `a`: repeats.
    Repeats,
    /// `S`: beaming (see also `N`).
    BeamingAlt,
    /// `U`: color tieup.
    ColorTieup,
    /// `v`: production.
    Production,
    /// `V`: cost.
    Cost,
    /// `x`: fabric pixels.
    FabricPixels,
    /// `8`: file creation date.
    CreationDate,
}

/// Capability descriptor for one segment id.
struct Capability {
    id: SegmentId,
    byte: u8,
    supported: bool,
    description: &'static str,
}

const fn cap(id: SegmentId, byte: u8, supported: bool, description: &'static str) -> Capability {
    Capability {
        id,
        byte,
        supported,
        description,
    }
}

static CAPABILITIES: &[Capability] = &[
    cap(SegmentId::Colorway, b'C', true, "Colorway"),
    cap(SegmentId::ColorwayMap, b'M', true, "Colorway"),
    cap(SegmentId::MajorMinorAccent, b'A', true, "Major/Minor/Accent"),
    cap(SegmentId::ColorPalette, b'Q', true, "ColorPalette (newest)"),
    cap(
        SegmentId::Version,
        b'D',
        true,
        "File format code - typically tracks the software version code",
    ),
    cap(SegmentId::Author, b'g', true, "Author's name, or Controls"),
    cap(SegmentId::Name, b'n', true, "Name (file name)"),
    cap(SegmentId::Pegplan, b'p', true, "Pegplan"),
    cap(SegmentId::WeftColors, b'q', true, "Weft colors"),
    cap(SegmentId::Treadling, b'r', true, "Treadling"),
    cap(SegmentId::WarpColors, b's', true, "Warp colors"),
    cap(SegmentId::Threading, b't', true, "Threading"),
    cap(SegmentId::OldThreading, b'h', false, "Threading (old style)"),
    cap(SegmentId::Tieup, b'u', true, "Tieup"),
    cap(SegmentId::PublicRemarks, b'Y', true, "Remarks (public, see also *)"),
    cap(SegmentId::PrivateRemarks, b'*', true, "Remarks (private, see also Y)"),
    cap(SegmentId::TrompType, b'R', true, "Tromp type"),
    cap(SegmentId::ColorTromp, b'T', true, "Color tromp"),
    cap(SegmentId::EndsPerUnit, b'e', false, "Ends per inch"),
    cap(SegmentId::PicksPerUnit, b'f', false, "Picks per inch"),
    cap(SegmentId::Reed, b'E', false, "Reed"),
    cap(SegmentId::Denting, b'K', false, "Denting"),
    cap(SegmentId::Selvages, b'L', false, "Selvages"),
    cap(SegmentId::ColorwayNew, b'P', false, "Colorway (newer)"),
    cap(SegmentId::ColorwayOld, b'c', false, "Colorway (old)"),
    cap(SegmentId::UserName, b'9', false, "User's name ('user' segment)"),
    cap(SegmentId::Unknown, b'b', false, "!!unknown!!"),
    cap(SegmentId::PrintOptions, b'B', false, "Print options"),
    cap(SegmentId::StopMotion, b'd', false, "Stop motion"),
    cap(SegmentId::FabricSize, b'J', false, "Fabric size"),
    cap(SegmentId::DobbyPick, b'k', false, "Dobby pick number"),
    cap(SegmentId::PaletteMask, b'm', false, "Palette mask"),
    cap(SegmentId::Beaming, b'N', false, "Beaming (see also S)"),
    cap(SegmentId::Repeats, b'a', false, "Repeats"),
    cap(SegmentId::BeamingAlt, b'S', false, "Beaming (see also N)"),
    cap(SegmentId::ColorTieup, b'U', false, "Color tieup"),
    cap(SegmentId::Production, b'v', false, "Production"),
    cap(SegmentId::Cost, b'V', false, "Cost"),
    cap(SegmentId::FabricPixels, b'x', false, "Pixels (fabric)"),
    cap(SegmentId::CreationDate, b'8', false, "File creation date"),
];

impl SegmentId {
    /// Look up a segment id byte. Returns `None` for unrecognized ids.
    pub fn from_byte(byte: u8) -> Option<Self> {
        CAPABILITIES.iter().find(|c| c.byte == byte).map(|c| c.id)
    }

    fn capability(&self) -> &'static Capability {
        // Every variant has exactly one row.
        CAPABILITIES
            .iter()
            .find(|c| c.id == *self)
            .unwrap_or(&CAPABILITIES[0])
    }

    /// The id byte as it appears in the file.
    pub fn byte(&self) -> u8 {
        self.capability().byte
    }

    /// The id as a character.
    pub fn as_char(&self) -> char {
        self.byte() as char
    }

    /// Whether the converter decodes this segment for WIF export.
    pub fn is_supported(&self) -> bool {
        self.capability().supported
    }

    /// Human-readable description of the segment.
    pub fn description(&self) -> &'static str {
        self.capability().description
    }

    /// Iterate over every recognized id in table order.
    pub fn all() -> impl Iterator<Item = SegmentId> {
        CAPABILITIES.iter().map(|c| c.id)
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One self-describing chunk of the container.
///
/// The payload always holds a whole number of entities:
/// `payload.len() == entity_count() * entity_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Segment id.
    pub id: SegmentId,
    /// Bytes per entity.
    pub entity_size: usize,
    /// Raw payload.
    pub payload: Vec<u8>,
    /// Absolute file offset of the segment prologue.
    pub offset: usize,
}

impl Segment {
    /// Create a segment from its parts.
    pub fn new(id: SegmentId, entity_size: usize, payload: Vec<u8>, offset: usize) -> Self {
        debug_assert!(entity_size > 0, "entity size must be positive");
        debug_assert_eq!(payload.len() % entity_size, 0);
        Self {
            id,
            entity_size,
            payload,
            offset,
        }
    }

    /// Number of entities in the payload.
    pub fn entity_count(&self) -> usize {
        if self.entity_size == 0 {
            0
        } else {
            self.payload.len() / self.entity_size
        }
    }

    /// Payload length in bytes.
    pub fn byte_len(&self) -> usize {
        self.payload.len()
    }

    /// Iterate over the payload one entity at a time.
    pub fn entities(&self) -> std::slice::ChunksExact<'_, u8> {
        self.payload.chunks_exact(self.entity_size.max(1))
    }
}
