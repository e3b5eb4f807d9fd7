/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Magic multipliers for the sliding attack tables.
//!
//! Each entry was found by an offline search and is collision-free for every blocker subset of its mask.
//! Entries for a piece share one flat table; `offset` is where a square's slots begin.

/// Everything needed to turn a blocker set into an index of a sliding attack table.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MagicEntry {
    /// Relevant blockers: every square along the piece's rays, excluding the board edge.
    pub mask: u64,
    pub magic: u64,
    /// `64 - mask.count_ones()`
    pub shift: u8,
    pub offset: u32,
}

impl MagicEntry {
    const fn new(mask: u64, magic: u64, shift: u8, offset: u32) -> Self {
        Self {
            mask,
            magic,
            shift,
            offset,
        }
    }
}

/// Total number of slots in the rook attack table.
pub const ROOK_TABLE_SIZE: usize = 102400;

#[rustfmt::skip]
pub const ROOK_MAGICS: [MagicEntry; 64] = [
    MagicEntry::new(0x000101010101017E, 0x008000102080400A, 52, 0),
    MagicEntry::new(0x000202020202027C, 0xE840400010002000, 53, 4096),
    MagicEntry::new(0x000404040404047A, 0x42000A008030E240, 53, 6144),
    MagicEntry::new(0x0008080808080876, 0x0200040810204200, 53, 8192),
    MagicEntry::new(0x001010101010106E, 0x7200100200200408, 53, 10240),
    MagicEntry::new(0x002020202020205E, 0x0200020008040110, 53, 12288),
    MagicEntry::new(0x004040404040403E, 0x0080020001000080, 53, 14336),
    MagicEntry::new(0x008080808080807E, 0x2780002D00104080, 52, 16384),
    MagicEntry::new(0x0001010101017E00, 0x1220800020804002, 53, 20480),
    MagicEntry::new(0x0002020202027C00, 0x9101400020005000, 54, 22528),
    MagicEntry::new(0x0004040404047A00, 0xA030802000821001, 54, 23552),
    MagicEntry::new(0x0008080808087600, 0x0121000810002100, 54, 24576),
    MagicEntry::new(0x0010101010106E00, 0x40A2000822001004, 54, 25600),
    MagicEntry::new(0x0020202020205E00, 0x0404808006002400, 54, 26624),
    MagicEntry::new(0x0040404040403E00, 0x10B1000100C20004, 54, 27648),
    MagicEntry::new(0x0080808080807E00, 0x2014800841000080, 53, 28672),
    MagicEntry::new(0x00010101017E0100, 0x0088288002854000, 53, 30720),
    MagicEntry::new(0x00020202027C0200, 0x1200818040002000, 54, 32768),
    MagicEntry::new(0x00040404047A0400, 0x8860808010082000, 54, 33792),
    MagicEntry::new(0x0008080808760800, 0xC284808010040800, 54, 34816),
    MagicEntry::new(0x00101010106E1000, 0x0084008080080004, 54, 35840),
    MagicEntry::new(0x00202020205E2000, 0x0022008004000280, 54, 36864),
    MagicEntry::new(0x00404040403E4000, 0x0100840010080182, 54, 37888),
    MagicEntry::new(0x00808080807E8000, 0x0010020000410084, 53, 38912),
    MagicEntry::new(0x000101017E010100, 0x2004658180004000, 53, 40960),
    MagicEntry::new(0x000202027C020200, 0x2000401280200080, 54, 43008),
    MagicEntry::new(0x000404047A040400, 0x0300100480200085, 54, 44032),
    MagicEntry::new(0x0008080876080800, 0x0409002100100008, 54, 45056),
    MagicEntry::new(0x001010106E101000, 0x000C001101000800, 54, 46080),
    MagicEntry::new(0x002020205E202000, 0x0030100801400420, 54, 47104),
    MagicEntry::new(0x004040403E404000, 0x0100100400010802, 54, 48128),
    MagicEntry::new(0x008080807E808000, 0x0001004200008401, 53, 49152),
    MagicEntry::new(0x0001017E01010100, 0x2940084185800020, 53, 51200),
    MagicEntry::new(0x0002027C02020200, 0x21A0482000401000, 54, 53248),
    MagicEntry::new(0x0004047A04040400, 0x4020080040401000, 54, 54272),
    MagicEntry::new(0x0008087608080800, 0x1010801000800800, 54, 55296),
    MagicEntry::new(0x0010106E10101000, 0x0000800800800401, 54, 56320),
    MagicEntry::new(0x0020205E20202000, 0x0042008002802400, 54, 57344),
    MagicEntry::new(0x0040403E40404000, 0x0303000401000200, 54, 58368),
    MagicEntry::new(0x0080807E80808000, 0x210F00084100008A, 53, 59392),
    MagicEntry::new(0x00017E0101010100, 0x0200800040008022, 53, 61440),
    MagicEntry::new(0x00027C0202020200, 0x8260008040028024, 54, 63488),
    MagicEntry::new(0x00047A0404040400, 0x0020401200820020, 54, 64512),
    MagicEntry::new(0x0008760808080800, 0x2010421200220008, 54, 65536),
    MagicEntry::new(0x00106E1010101000, 0x1058001009010004, 54, 66560),
    MagicEntry::new(0x00205E2020202000, 0x8000042040080110, 54, 67584),
    MagicEntry::new(0x00403E4040404000, 0x0004021001040088, 54, 68608),
    MagicEntry::new(0x00807E8080808000, 0x000A11004082000C, 53, 69632),
    MagicEntry::new(0x007E010101010100, 0x0004800140012480, 53, 71680),
    MagicEntry::new(0x007C020202020200, 0x20C0304902008200, 54, 73728),
    MagicEntry::new(0x007A040404040400, 0x0810200900401100, 54, 74752),
    MagicEntry::new(0x0076080808080800, 0x001A100080080080, 54, 75776),
    MagicEntry::new(0x006E101010101000, 0x1000080004008080, 54, 76800),
    MagicEntry::new(0x005E202020202000, 0x0404000201004040, 54, 77824),
    MagicEntry::new(0x003E404040404000, 0x0402800100020080, 54, 78848),
    MagicEntry::new(0x007E808080808000, 0x0840040840810A00, 53, 79872),
    MagicEntry::new(0x7E01010101010100, 0x680B210080401202, 52, 81920),
    MagicEntry::new(0x7C02020202020200, 0x0000400810850021, 53, 86016),
    MagicEntry::new(0x7A04040404040400, 0x2048200100100945, 53, 88064),
    MagicEntry::new(0x7608080808080800, 0x1882100005210009, 53, 90112),
    MagicEntry::new(0x6E10101010101000, 0x8001000402100801, 53, 92160),
    MagicEntry::new(0x5E20202020202000, 0x0011000400880241, 53, 94208),
    MagicEntry::new(0x3E40404040404000, 0x02080800C2100104, 53, 96256),
    MagicEntry::new(0x7E80808080808000, 0x0228204020840112, 52, 98304),
];

/// Total number of slots in the bishop attack table.
pub const BISHOP_TABLE_SIZE: usize = 5248;

#[rustfmt::skip]
pub const BISHOP_MAGICS: [MagicEntry; 64] = [
    MagicEntry::new(0x0040201008040200, 0x001042280A5C0441, 58, 0),
    MagicEntry::new(0x0000402010080400, 0x4420380200504120, 59, 64),
    MagicEntry::new(0x0000004020100A00, 0x12040802184C0040, 59, 96),
    MagicEntry::new(0x0000000040221400, 0x8004404082028082, 59, 128),
    MagicEntry::new(0x0000000002442800, 0x0002021000020080, 59, 160),
    MagicEntry::new(0x0000000204085000, 0x9104242009100000, 59, 192),
    MagicEntry::new(0x0000020408102000, 0x68B1010802401110, 59, 224),
    MagicEntry::new(0x0002040810204000, 0x0002A18208200A94, 58, 256),
    MagicEntry::new(0x0020100804020000, 0x4400208912008400, 59, 320),
    MagicEntry::new(0x0040201008040000, 0x00302044C0820042, 59, 352),
    MagicEntry::new(0x00004020100A0000, 0x0040190409220011, 59, 384),
    MagicEntry::new(0x0000004022140000, 0x4900522282002008, 59, 416),
    MagicEntry::new(0x0000000244280000, 0x224A045040209000, 59, 448),
    MagicEntry::new(0x0000020408500000, 0x0204010928400105, 59, 480),
    MagicEntry::new(0x0002040810200000, 0x01400304102A0A00, 59, 512),
    MagicEntry::new(0x0004081020400000, 0x7000060201010881, 59, 544),
    MagicEntry::new(0x0010080402000200, 0x2090000404105440, 59, 576),
    MagicEntry::new(0x0020100804000400, 0x40503C03100A0082, 59, 608),
    MagicEntry::new(0x004020100A000A00, 0x1808025000801014, 57, 640),
    MagicEntry::new(0x0000402214001400, 0x1A80802802024049, 57, 768),
    MagicEntry::new(0x0000024428002800, 0x0102042401210000, 57, 896),
    MagicEntry::new(0x0002040850005000, 0x4086002900520200, 57, 1024),
    MagicEntry::new(0x0004081020002000, 0x0001005041282000, 59, 1152),
    MagicEntry::new(0x0008102040004000, 0x2801041022861000, 59, 1184),
    MagicEntry::new(0x0008040200020400, 0x2082A0001004102A, 59, 1216),
    MagicEntry::new(0x0010080400040800, 0x1001500404246804, 59, 1248),
    MagicEntry::new(0x0020100A000A1000, 0x0842010202080200, 57, 1280),
    MagicEntry::new(0x0040221400142200, 0x4940040100410020, 55, 1408),
    MagicEntry::new(0x0002442800284400, 0x4042002002008046, 55, 1920),
    MagicEntry::new(0x0004085000500800, 0x0050030000240118, 57, 2432),
    MagicEntry::new(0x0008102000201000, 0x8002140600808800, 59, 2560),
    MagicEntry::new(0x0010204000402000, 0x00042021228A0500, 59, 2592),
    MagicEntry::new(0x0004020002040800, 0x0091042100102126, 59, 2624),
    MagicEntry::new(0x0008040004081000, 0x0808882000044480, 59, 2656),
    MagicEntry::new(0x00100A000A102000, 0x0001211000204880, 57, 2688),
    MagicEntry::new(0x0022140014224000, 0x0924020080180080, 55, 2816),
    MagicEntry::new(0x0044280028440200, 0x0141100400008021, 55, 3328),
    MagicEntry::new(0x0008500050080400, 0x0860004100088086, 57, 3840),
    MagicEntry::new(0x0010200020100800, 0x808A4802200A4200, 59, 3968),
    MagicEntry::new(0x0020400040201000, 0x0000811200084200, 59, 4000),
    MagicEntry::new(0x0002000204081000, 0x6E0110A820000400, 59, 4032),
    MagicEntry::new(0x0004000408102000, 0x000C140104000900, 59, 4064),
    MagicEntry::new(0x000A000A10204000, 0x000212010101D000, 57, 4096),
    MagicEntry::new(0x0014001422400000, 0x020004C200900800, 57, 4224),
    MagicEntry::new(0x0028002844020000, 0x1045200208884400, 57, 4352),
    MagicEntry::new(0x0050005008040200, 0x00A4100202002258, 57, 4480),
    MagicEntry::new(0x0020002010080400, 0xA010103200A26040, 59, 4608),
    MagicEntry::new(0x0040004020100800, 0x0022020451040600, 59, 4640),
    MagicEntry::new(0x0000020408102000, 0x8004240104100001, 59, 4672),
    MagicEntry::new(0x0000040810204000, 0x2001044110085800, 59, 4704),
    MagicEntry::new(0x00000A1020400000, 0x020000242A080211, 59, 4736),
    MagicEntry::new(0x0000142240000000, 0x0010400041108018, 59, 4768),
    MagicEntry::new(0x0000284402000000, 0x0401000861044000, 59, 4800),
    MagicEntry::new(0x0000500804020000, 0x00410B20280080A2, 59, 4832),
    MagicEntry::new(0x0000201008040200, 0x8041040420820010, 59, 4864),
    MagicEntry::new(0x0000402010080400, 0x0002100913090400, 59, 4896),
    MagicEntry::new(0x0002040810204000, 0x4050140084442002, 58, 4928),
    MagicEntry::new(0x0004081020400000, 0x8A00010401044200, 59, 4992),
    MagicEntry::new(0x000A102040000000, 0x800040102402080C, 59, 5024),
    MagicEntry::new(0x0014224000000000, 0x43800400A2050420, 59, 5056),
    MagicEntry::new(0x0028440200000000, 0x8204000010202211, 59, 5088),
    MagicEntry::new(0x0050080402000000, 0x1000404002440100, 59, 5120),
    MagicEntry::new(0x0020100804020000, 0x1082200821154410, 59, 5152),
    MagicEntry::new(0x0040201008040200, 0x0002200C05005100, 58, 5184),
];
