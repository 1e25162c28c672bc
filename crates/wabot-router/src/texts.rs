// SPDX-FileCopyrightText: 2026 Wabot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User-facing reply texts and info cards.
//!
//! All strings the router sends back to a conversation live here so the
//! handlers stay free of literals and the wording can be reviewed in one
//! place.

pub const AI_USAGE: &str = "❌ Contoh: *.ai apa itu black hole?*";
pub const AI_THINKING: &str = "⏳ Sedang berpikir...";
pub const AI_FAILED: &str = "❌ Terjadi kesalahan saat memproses AI";

pub const TTDL_USAGE: &str = "❌ Mana link TikTok?";
pub const TTDL_PROCESSING: &str = "⏳ Memproses link...";
pub const TTDL_NO_DATA: &str = "❌ Gagal mendapatkan data video TikTok.";
pub const TTDL_NO_VIDEO: &str = "❌ Video tidak tersedia.";
pub const TTDL_FAILED: &str = "❌ Gagal memproses link TikTok.";
pub const TTDL_CAPTION: &str = "🎬 Video TikTok";

pub const STICKER_USAGE: &str = "❌ Kirim gambar/video dulu lalu ketik *.sticker*";
pub const STICKER_TRANSCODE_FAILED: &str = "❌ Gagal membuat stiker.";
pub const STICKER_SEND_FAILED: &str = "❌ Gagal mengirim stiker.";
pub const STICKER_FAILED: &str = "❌ Terjadi kesalahan saat membuat stiker.";

pub const STATUS_USAGE: &str = "❌ Balas status orang dengan perintah .s";
pub const STATUS_NO_MEDIA: &str = "❌ Tidak ada media status yang bisa diunduh!";
pub const STATUS_ACK: &str = "✅ Status berhasil dikirim ke owner.";
pub const STATUS_FAILED: &str =
    "❌ Gagal mengunduh status. Pastikan belum kedaluwarsa atau media masih tersedia.";

pub const SETNAME_USAGE: &str = "❌ Contoh: .setname Nama Baru";
pub const SETNAME_OK: &str = "✅ Nama grup berhasil diganti!";
pub const SETNAME_FAILED: &str = "❌ Gagal mengganti nama grup.";
pub const SETNAME_ADMIN_ONLY: &str = "❌ Hanya admin yang bisa mengubah nama grup.";

pub const SETDESC_USAGE: &str = "❌ Contoh: .setdesc Deskripsi Baru";
pub const SETDESC_OK: &str = "✅ Deskripsi grup berhasil diganti!";
pub const SETDESC_FAILED: &str = "❌ Gagal mengganti deskripsi grup.";
pub const SETDESC_ADMIN_ONLY: &str = "❌ Hanya admin yang bisa mengubah deskripsi.";

pub const KICK_USAGE: &str = "❌ Tag member yang ingin di-kick.";
pub const KICK_OK: &str = "✅ Member berhasil di-kick.";
pub const KICK_FAILED: &str = "❌ Gagal kick member.";
pub const KICK_ADMIN_ONLY: &str = "❌ Hanya admin yang bisa kick.";

pub const TAGALL_TEXT: &str = "👥 Tag semua member!";
pub const TAGALL_ADMIN_ONLY: &str = "❌ Hanya admin yang bisa tag all.";

pub const GROUP_ONLY: &str = "❌ Perintah ini hanya bisa dipakai di dalam grup.";
pub const OWNER_ONLY: &str = "❌ Perintah ini khusus owner bot.";

pub const RECOVER_NOTHING: &str = "❌ Tidak ada pesan terhapus yang bisa dipulihkan!";
pub const RECOVER_IMAGE_CAPTION: &str = "♻️ Gambar yang terhapus";
pub const RECOVER_VIDEO_CAPTION: &str = "♻️ Video yang terhapus";
pub const RECOVER_IMAGE_FAILED: &str = "❌ Gagal memulihkan gambar terhapus.";
pub const RECOVER_VIDEO_FAILED: &str = "❌ Gagal memulihkan video terhapus.";
pub const RECOVER_DOCUMENT_FAILED: &str = "❌ Gagal memulihkan dokumen terhapus.";
pub const RECOVER_AUDIO_FAILED: &str = "❌ Gagal memulihkan audio terhapus.";
pub const RECOVER_STICKER_FAILED: &str = "❌ Gagal memulihkan stiker terhapus.";

pub fn recovered_text(body: &str) -> String {
    format!("♻️ Pesan Terhapus:\n\n{body}")
}

pub fn status_caption(kind_emoji: &str, from: &str, filename: &str) -> String {
    format!("{kind_emoji} Status dari: {from}\nDisimpan: {filename}")
}

pub fn menu_card() -> String {
    "\n╭───〔 🌟 MENU BOT 〕\n│\n│ 📌 Fitur Bot\n│   *.owner*      → Info pemilik bot\n│   *.bot*        → Info teknis bot\n│   *.runtime*    → Info sistem & uptime\n│\n│ 📌 Fitur AI\n│   *.ai <pertanyaan>* → Chat AI\n│\n│ 📌 Fitur Media\n│   *.ttdl <link>*      → Download TikTok\n│   *.sticker*          → Buat stiker dari gambar/video\n│   *.s*                → Unduh status WhatsApp (reply status)\n│\n│ 📌 Fitur Grup (Admin)\n│   *.setname <nama>*   → Ganti nama grup\n│   *.setdesc <desc>*   → Ganti deskripsi grup\n│   *.kick @user*       → Kick member\n│   *.tagall*           → Mention semua member\n╰────────────────\n".to_string()
}

pub fn owner_card(owner_name: &str, owner_number: &str) -> String {
    format!(
        "\n╔═════════════════════\n\
         ║ 👑 OWNER BOT\n\
         ╠═════════════════════\n\
         ║ Nama   : {owner_name}\n\
         ║ Nomor  : wa.me/{owner_number}\n\
         ║ Role   : Developer\n\
         ║ Akses  : Semua fitur & konfigurasi bot\n\
         ╠═════════════════════\n\
         ║ 💡 Tip: Gunakan fitur ini hanya jika perlu\n\
         ╚═════════════════════\n"
    )
}

pub fn bot_card(agent_name: &str, ai_model: &str) -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        "\n╔════════════════════\n\
         ║ 🤖 INFORMASI BOT\n\
         ╠════════════════════\n\
         ║ Nama Bot      : {agent_name}\n\
         ║ Versi         : {version}\n\
         ║ Dibuat Dengan :\n\
         ║   - Rust {rust_edition}\n\
         ║   - AI Model: {ai_model}\n\
         ║   - Database : File system\n\
         ║ Platform      : Termux / Linux / Android\n\
         ╚════════════════════\n",
        rust_edition = "(edisi 2024)",
    )
}

pub struct RuntimeInfo {
    pub uptime: String,
    pub cpu_model: String,
    pub used_mem_mb: u64,
    pub total_mem_mb: u64,
    pub started_at: String,
}

pub fn runtime_card(info: &RuntimeInfo) -> String {
    let percent = if info.total_mem_mb == 0 {
        0
    } else {
        (info.used_mem_mb * 100 + info.total_mem_mb / 2) / info.total_mem_mb
    };
    let filled = (percent * 20 + 50) / 100;
    let filled = filled.min(20) as usize;
    let bar = "█".repeat(filled) + &"░".repeat(20 - filled);
    format!(
        "\n╔═════════════════\n\
         ║ ⏳ BOT RUNTIME\n\
         ╠═════════════════\n\
         ║ Uptime       : {uptime}\n\
         ║ CPU          : {cpu}\n\
         ║ RAM          : {used}MB / {total}MB\n\
         ║               [{bar}] {percent}%\n\
         ║ Platform     : {platform} {arch}\n\
         ║ Wabot        : v{version}\n\
         ║ Active since : {started}\n\
         ╚═════════════════\n",
        uptime = info.uptime,
        cpu = info.cpu_model,
        used = info.used_mem_mb,
        total = info.total_mem_mb,
        platform = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        version = env!("CARGO_PKG_VERSION"),
        started = info.started_at,
    )
}
