// Fixed, launchable catalog entries

/// A catalog slot that always holds the same real program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reserved {
    /// 1-indexed position in the catalog
    pub number: usize,
    pub name: &'static str,
    pub category: &'static str,
    pub version: &'static str,
    /// Key handed to the launcher
    pub launch_key: &'static str,
    pub description: &'static str,
}

/// The programs shipped on the disc, programs #387-392
pub const RESERVED: &[Reserved] = &[
    Reserved {
        number: 387,
        name: "GLITCHDEX MALL - Original",
        category: "game",
        version: "1.0",
        launch_key: "v1",
        description: "Original Wolf3D-style retro mall crawler",
    },
    Reserved {
        number: 388,
        name: "GLITCHDEX MALL - Immersive Sim",
        category: "game",
        version: "2.0",
        launch_key: "v2",
        description: "Advanced AI architecture with factions & stealth",
    },
    Reserved {
        number: 389,
        name: "EASTLAND MALL - Graphical Engine",
        category: "game",
        version: "3.0",
        launch_key: "v3",
        description: "Pygame raycaster with all V2 systems",
    },
    Reserved {
        number: 390,
        name: "RENDERIST MALL OS - Cloud World",
        category: "game",
        version: "4.0",
        launch_key: "v4",
        description: "Cloud-driven semantic space architecture",
    },
    Reserved {
        number: 391,
        name: "EASTLAND MALL - CRD Reconstruction",
        category: "documentation",
        version: "5.0",
        launch_key: "v5",
        description: "Classification Reference Document methodology",
    },
    Reserved {
        number: 392,
        name: "GLITCHDEX MALL - Next Generation",
        category: "game",
        version: "6.0",
        launch_key: "v6",
        description: "Future development placeholder",
    },
];

/// Sequence number pre-selected when the browser opens
pub const INITIAL_SELECTION: usize = 387;
