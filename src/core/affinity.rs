//! Static affinity tables for categorical signals
//!
//! Every table is populated for every ordered pair, so lookups never miss
//! once both sides resolve to a category.

use crate::models::{CoreValue, LifestyleRhythm, Objective, WeekendStyle, ZodiacSign};

/// Affinity used when either sign is absent
pub const SIGN_FALLBACK: u8 = 50;

/// Sign-pair affinity, rows and columns in `ZodiacSign::ALL` order
#[rustfmt::skip]
const SIGN_AFFINITY: [[u8; 12]; 12] = [
    //Ari Tau Gem Can Leo Vir Lib Sco Sag Cap Aqu Pis
    [70, 45, 83, 42, 97, 38, 62, 50, 93, 47, 78, 67], // Aries
    [45, 75, 42, 92, 58, 95, 68, 88, 35, 97, 43, 87], // Taurus
    [83, 42, 72, 53, 85, 58, 93, 40, 78, 45, 95, 52], // Gemini
    [42, 92, 53, 75, 62, 85, 47, 97, 38, 58, 43, 95], // Cancer
    [97, 58, 85, 62, 78, 52, 88, 55, 95, 48, 68, 53], // Leo
    [38, 95, 58, 85, 52, 72, 63, 92, 43, 97, 48, 78], // Virgo
    [62, 68, 93, 47, 88, 63, 75, 72, 85, 53, 95, 58], // Libra
    [50, 88, 40, 97, 55, 92, 72, 78, 47, 85, 43, 95], // Scorpio
    [93, 35, 78, 38, 95, 43, 85, 47, 80, 52, 88, 58], // Sagittarius
    [47, 97, 45, 58, 48, 97, 53, 85, 52, 78, 62, 73], // Capricorn
    [78, 43, 95, 43, 68, 48, 95, 43, 88, 62, 75, 58], // Aquarius
    [67, 87, 52, 95, 53, 78, 58, 95, 58, 73, 58, 82], // Pisces
];

#[rustfmt::skip]
const OBJECTIVE_AFFINITY: [[u8; 4]; 4] = [
    //Love Ser  Adv  Uns
    [100,  95,  20,  45], // Love
    [ 95, 100,  25,  55], // Serious
    [ 20,  25, 100,  75], // Adventure
    [ 45,  55,  75, 100], // Unsure
];

#[rustfmt::skip]
const WEEKEND_AFFINITY: [[u8; 4]; 4] = [
    //Party Home Adv  Cult
    [100,  25,  70,  55], // PartyGoer
    [ 25, 100,  45,  80], // Homebody
    [ 70,  45, 100,  65], // Adventurer
    [ 55,  80,  65, 100], // Cultural
];

#[rustfmt::skip]
const RHYTHM_AFFINITY: [[u8; 4]; 4] = [
    //Night Bal Home Flex
    [100,  55,  15,  70], // Nightlife
    [ 55, 100,  70,  90], // Balanced
    [ 15,  70, 100,  55], // Homebody
    [ 70,  90,  55, 100], // Flexible
];

#[rustfmt::skip]
const VALUE_AFFINITY: [[u8; 4]; 4] = [
    //Loyal Ind Hum  Amb
    [100,  45,  70,  60], // Loyal
    [ 45, 100,  75,  85], // Independent
    [ 70,  75, 100,  50], // Humor
    [ 60,  85,  50, 100], // Ambitious
];

/// A questionnaire dimension with a 4x4 affinity table
///
/// Missing answers resolve to `NEUTRAL` before the lookup, so two absent
/// answers still land on a defined cell.
pub trait Category: Copy {
    const NEUTRAL: Self;
    const TABLE: &'static [[u8; 4]; 4];

    fn index(self) -> usize;

    #[inline]
    fn affinity(self, other: Self) -> u8 {
        Self::TABLE[self.index()][other.index()]
    }
}

impl Category for Objective {
    const NEUTRAL: Self = Objective::Unsure;
    const TABLE: &'static [[u8; 4]; 4] = &OBJECTIVE_AFFINITY;

    fn index(self) -> usize {
        self as usize
    }
}

impl Category for WeekendStyle {
    const NEUTRAL: Self = WeekendStyle::Cultural;
    const TABLE: &'static [[u8; 4]; 4] = &WEEKEND_AFFINITY;

    fn index(self) -> usize {
        self as usize
    }
}

impl Category for LifestyleRhythm {
    const NEUTRAL: Self = LifestyleRhythm::Flexible;
    const TABLE: &'static [[u8; 4]; 4] = &RHYTHM_AFFINITY;

    fn index(self) -> usize {
        self as usize
    }
}

impl Category for CoreValue {
    const NEUTRAL: Self = CoreValue::Loyal;
    const TABLE: &'static [[u8; 4]; 4] = &VALUE_AFFINITY;

    fn index(self) -> usize {
        self as usize
    }
}

/// Affinity between two signs, `SIGN_FALLBACK` if either is absent
#[inline]
pub fn sign_affinity(a: Option<ZodiacSign>, b: Option<ZodiacSign>) -> u8 {
    match (a, b) {
        (Some(a), Some(b)) => SIGN_AFFINITY[a as usize][b as usize],
        _ => SIGN_FALLBACK,
    }
}

/// Affinity between two optional answers of the same dimension
#[inline]
pub fn answer_affinity<C: Category>(a: Option<C>, b: Option<C>) -> u8 {
    a.unwrap_or(C::NEUTRAL).affinity(b.unwrap_or(C::NEUTRAL))
}
