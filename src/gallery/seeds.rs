//! Built-in card content that every generated card is drawn from.

/// Icon, title and description of one seed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const SEED_CARDS: &[Seed] = &[
    Seed {
        icon: "\u{1F525}", // 🔥
        title: "Fire Spell",
        description: "Unleash a blazing inferno that scorches every foe in its path.",
    },
    Seed {
        icon: "\u{1F4A7}", // 💧
        title: "Water Shield",
        description: "A shimmering wall of water that absorbs incoming attacks.",
    },
    Seed {
        icon: "\u{26A1}", // ⚡
        title: "Lightning Bolt",
        description: "Strike from the sky with crackling electric fury.",
    },
    Seed {
        icon: "\u{1F33F}", // 🌿
        title: "Nature's Blessing",
        description: "Restore health as vines and leaves knit wounds closed.",
    },
    Seed {
        icon: "\u{1F319}", // 🌙
        title: "Moonlight Veil",
        description: "Cloak yourself in silver light and slip past unseen.",
    },
    Seed {
        icon: "\u{2B50}", // ⭐
        title: "Star Fall",
        description: "Call down a shower of stars that dazzles the battlefield.",
    },
    Seed {
        icon: "\u{1F32A}", // 🌪
        title: "Whirlwind",
        description: "Summon a spinning gale that scatters everything nearby.",
    },
    Seed {
        icon: "\u{1F48E}", // 💎
        title: "Crystal Ward",
        description: "Encase an ally in unbreakable crystal for one turn.",
    },
];
