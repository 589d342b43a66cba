//! Enumerations used by tasks and wallpaper settings.
//!
//! Every enum carries three spellings: the serde name (also used by the
//! string-keyed setting path), the clap value name (identical, case-insensitive
//! on the command line) and a human label for the UI.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task importance. Drives the dashboard emphasis and the `priority` preview filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Task category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum Category {
    Work,
    Personal,
    Health,
    Education,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Health,
        Category::Education,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Health => "Health",
            Category::Education => "Education",
        }
    }
}

/// Wallpaper background.
///
/// The three monochrome choices are free; gradients and the custom image
/// require the premium entitlement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Background {
    BlackWhite,
    SolidBlack,
    SolidWhite,
    GradientPurple,
    GradientBlue,
    GradientGreen,
    Image,
}

impl Background {
    pub const ALL: [Background; 7] = [
        Background::BlackWhite,
        Background::SolidBlack,
        Background::SolidWhite,
        Background::GradientPurple,
        Background::GradientBlue,
        Background::GradientGreen,
        Background::Image,
    ];

    pub fn is_premium(self) -> bool {
        !matches!(
            self,
            Background::BlackWhite | Background::SolidBlack | Background::SolidWhite
        )
    }

    pub fn is_gradient(self) -> bool {
        matches!(
            self,
            Background::GradientPurple | Background::GradientBlue | Background::GradientGreen
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Background::BlackWhite => "Black & White",
            Background::SolidBlack => "Solid Black",
            Background::SolidWhite => "Solid White",
            Background::GradientPurple => "Gradient Purple",
            Background::GradientBlue => "Gradient Blue",
            Background::GradientGreen => "Gradient Green",
            Background::Image => "Custom Image",
        }
    }
}

/// Wallpaper font family. Montserrat is premium-only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[value(rename_all = "verbatim")]
pub enum Font {
    Inter,
    Roboto,
    Poppins,
    Montserrat,
}

impl Font {
    pub const ALL: [Font; 4] = [Font::Inter, Font::Roboto, Font::Poppins, Font::Montserrat];

    pub fn is_premium(self) -> bool {
        self == Font::Montserrat
    }

    pub fn label(self) -> &'static str {
        match self {
            Font::Inter => "Inter",
            Font::Roboto => "Roboto",
            Font::Poppins => "Poppins",
            Font::Montserrat => "Montserrat",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];

    pub fn label(self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
        }
    }
}

/// Which tasks the wallpaper preview shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lower")]
pub enum ShowType {
    All,
    /// Tasks carry no date, so this selects the same tasks as `All`.
    Today,
    Priority,
}

impl ShowType {
    pub const ALL: [ShowType; 3] = [ShowType::All, ShowType::Today, ShowType::Priority];

    pub fn label(self) -> &'static str {
        match self {
            ShowType::All => "All Tasks",
            ShowType::Today => "Today Only",
            ShowType::Priority => "High Priority Only",
        }
    }
}
