use chrono::{DateTime, Utc};
use indoc::formatdoc;

use crate::catalog::Stream;
use crate::util::{escape_html, title_case};

/// Renders the live-TV page: category tabs, channel-card grids and a modal
/// iframe player. Entirely self-contained; the only external requests are
/// the channel logos and the streams themselves.
#[must_use]
pub fn render_index(streams: &[Stream], generated_at: DateTime<Utc>) -> String {
    let categories = group_by_category(streams);

    let mut tabs = String::new();
    let mut panels = String::new();
    for (idx, (category, channels)) in categories.iter().enumerate() {
        let active = if idx == 0 { " active" } else { "" };
        let label = escape_html(&title_case(category));
        let slug = escape_html(category);

        tabs.push_str(&format!(
            r#"<button class="tab-btn{active}" data-category="{slug}">{label} ({})</button>"#,
            channels.len()
        ));

        panels.push_str(&format!(
            r#"<div class="category-content{active}" data-category="{slug}"><div class="channel-grid">"#
        ));
        for channel in channels {
            panels.push_str(&render_channel_card(channel));
        }
        panels.push_str("</div></div>");
    }

    formatdoc! {r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <meta name="viewport" content="width=device-width, initial-scale=1.0">
            <title>Live TV Streams - {total} Channels</title>
            <style>{style}</style>
        </head>
        <body>
            <div class="container">
                <header>
                    <h1>📺 Live TV Streams</h1>
                    <div class="stats">
                        <p>Last Updated: {updated}</p>
                        <p>Total Channels: <strong>{total}</strong></p>
                        <p><a href="/playlist.m3u8">Download M3U8</a> | <a href="/streams.json">View JSON API</a></p>
                    </div>
                </header>
                <div class="tabs">{tabs}</div>
                {panels}
                <footer>
                    <p>Streams update every 30 minutes • Data for Android &amp; Web apps</p>
                </footer>
            </div>
            <div class="player-modal" id="playerModal">
                <div class="player-container">
                    <button class="close-btn" onclick="closePlayer()">×</button>
                    <iframe class="player-iframe" id="playerFrame" allowfullscreen></iframe>
                </div>
            </div>
            <script>{script}</script>
        </body>
        </html>
    "#,
        total = streams.len(),
        updated = generated_at.format("%Y-%m-%d %H:%M UTC"),
        style = INDEX_STYLE,
        script = INDEX_SCRIPT,
    }
}

fn render_channel_card(channel: &Stream) -> String {
    let play_type = if channel.source_type.is_iframe() {
        "iframe"
    } else {
        "direct"
    };
    let name = escape_html(&channel.name);

    format!(
        r#"<div class="channel-card" data-url="{url}" data-type="{play_type}" data-name="{name}"><img src="{logo}" class="channel-logo" alt="{name}"><h3>{name}</h3><span class="country">{country}</span></div>"#,
        url = escape_html(&channel.url),
        logo = escape_html(&channel.logo),
        country = escape_html(&channel.country),
    )
}

/// Groups streams by category, keeping the order categories first appear in.
fn group_by_category(streams: &[Stream]) -> Vec<(String, Vec<&Stream>)> {
    let mut grouped: Vec<(String, Vec<&Stream>)> = Vec::new();

    for stream in streams {
        match grouped.iter_mut().find(|(cat, _)| *cat == stream.category) {
            Some((_, members)) => members.push(stream),
            None => grouped.push((stream.category.clone(), vec![stream])),
        }
    }

    grouped
}

/// Renders the on-demand library page. Catalog data is loaded client-side
/// from `anime.json` / `movies.json`, so the page itself is fully static.
#[must_use]
pub fn render_library() -> String {
    formatdoc! {r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <meta name="viewport" content="width=device-width, initial-scale=1.0">
            <title>Anime &amp; Movies - Video Library</title>
            <style>{style}</style>
        </head>
        <body>
            <div class="container">
                <header>
                    <h1>🎬 Video Library</h1>
                    <p>Anime &amp; Movies Collection</p>
                </header>
                <div class="tabs">
                    <button class="tab-btn active" onclick="switchTab('anime')">📺 Anime</button>
                    <button class="tab-btn" onclick="switchTab('movies')">🎥 Movies</button>
                </div>
                <div id="anime" class="content active"><div id="animeGrid" class="grid"></div></div>
                <div id="movies" class="content"><div id="moviesGrid" class="grid"></div></div>
            </div>
            <div id="modal" class="modal">
                <div class="modal-content">
                    <div class="modal-header">
                        <div class="modal-title" id="modalTitle"></div>
                        <button class="close-btn" onclick="closeModal()">✕</button>
                    </div>
                    <div class="modal-body">
                        <img id="modalImage" class="modal-image" alt="">
                        <div class="modal-info">
                            <h3>📝 Description</h3>
                            <p class="modal-description" id="modalDescription"></p>
                            <div id="episodesSection"></div>
                            <div id="videoSection"></div>
                        </div>
                    </div>
                </div>
            </div>
            <script>{script}</script>
        </body>
        </html>
    "#,
        style = LIBRARY_STYLE,
        script = LIBRARY_SCRIPT,
    }
}

const INDEX_STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
    color: white;
    min-height: 100vh;
}
.container { max-width: 1400px; margin: 0 auto; padding: 20px; }
header { text-align: center; margin-bottom: 30px; }
h1 { font-size: 2.5rem; margin-bottom: 10px; }
.stats { font-size: 1.1rem; opacity: 0.9; }
.stats a { color: #fff; text-decoration: underline; }
.tabs { display: flex; gap: 10px; margin-bottom: 30px; flex-wrap: wrap; justify-content: center; }
.tab-btn {
    background: rgba(255,255,255,0.2);
    border: none;
    padding: 12px 24px;
    border-radius: 25px;
    color: white;
    cursor: pointer;
    font-size: 1rem;
    transition: all 0.3s;
}
.tab-btn:hover { background: rgba(255,255,255,0.3); }
.tab-btn.active { background: rgba(255,255,255,0.4); font-weight: bold; }
.category-content { display: none; }
.category-content.active { display: block; }
.channel-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 20px; }
.channel-card {
    background: rgba(255,255,255,0.15);
    border-radius: 15px;
    padding: 20px;
    text-align: center;
    cursor: pointer;
    transition: all 0.3s;
    backdrop-filter: blur(10px);
}
.channel-card:hover {
    transform: translateY(-5px);
    background: rgba(255,255,255,0.25);
    box-shadow: 0 10px 30px rgba(0,0,0,0.3);
}
.channel-logo {
    width: 100px;
    height: 100px;
    object-fit: contain;
    margin-bottom: 15px;
    border-radius: 10px;
    background: white;
    padding: 10px;
}
h3 { font-size: 1rem; margin-bottom: 8px; }
.country { font-size: 0.85rem; opacity: 0.8; }
.player-modal {
    display: none;
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 100%;
    background: rgba(0,0,0,0.95);
    z-index: 1000;
    padding: 20px;
}
.player-modal.active { display: flex; align-items: center; justify-content: center; }
.player-container { width: 100%; max-width: 1200px; position: relative; }
.close-btn {
    position: absolute;
    top: -40px;
    right: 0;
    background: rgba(255,255,255,0.2);
    border: none;
    color: white;
    font-size: 2rem;
    width: 50px;
    height: 50px;
    border-radius: 50%;
    cursor: pointer;
    z-index: 1001;
}
.player-iframe { width: 100%; height: 80vh; border: none; border-radius: 10px; }
footer { text-align: center; margin-top: 50px; padding: 20px; opacity: 0.8; }
"#;

const INDEX_SCRIPT: &str = r#"
document.querySelectorAll('.tab-btn').forEach(btn => {
    btn.addEventListener('click', () => {
        const category = btn.dataset.category;
        document.querySelectorAll('.tab-btn').forEach(b => b.classList.remove('active'));
        document.querySelectorAll('.category-content').forEach(c => c.classList.remove('active'));
        btn.classList.add('active');
        document.querySelector(`.category-content[data-category="${category}"]`).classList.add('active');
    });
});

document.querySelectorAll('.channel-card').forEach(card => {
    card.addEventListener('click', () => {
        const url = card.dataset.url;
        if (card.dataset.type === 'iframe') {
            document.getElementById('playerFrame').src = url;
            document.getElementById('playerModal').classList.add('active');
        } else {
            window.open(url, '_blank');
        }
    });
});

function closePlayer() {
    document.getElementById('playerModal').classList.remove('active');
    document.getElementById('playerFrame').src = '';
}

document.addEventListener('keydown', (e) => {
    if (e.key === 'Escape') closePlayer();
});
"#;

const LIBRARY_STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: linear-gradient(135deg, #1e3c72 0%, #2a5298 50%, #7e22ce 100%);
    color: white;
    min-height: 100vh;
}
.container { max-width: 1400px; margin: 0 auto; padding: 20px; }
header {
    text-align: center;
    margin-bottom: 40px;
    padding: 30px 0;
    background: rgba(0,0,0,0.3);
    border-radius: 20px;
}
h1 { font-size: 3rem; margin-bottom: 10px; text-shadow: 2px 2px 4px rgba(0,0,0,0.5); }
.tabs { display: flex; gap: 10px; margin-bottom: 30px; justify-content: center; flex-wrap: wrap; }
.tab-btn {
    background: rgba(255,255,255,0.2);
    border: 2px solid rgba(255,255,255,0.3);
    padding: 15px 30px;
    border-radius: 25px;
    color: white;
    cursor: pointer;
    font-size: 1.1rem;
    font-weight: 600;
    transition: all 0.3s;
}
.tab-btn:hover { background: rgba(255,255,255,0.3); transform: translateY(-2px); }
.tab-btn.active { background: rgba(255,255,255,0.4); box-shadow: 0 5px 15px rgba(0,0,0,0.3); }
.content { display: none; }
.content.active { display: block; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(250px, 1fr)); gap: 25px; }
.card {
    background: rgba(255,255,255,0.1);
    border-radius: 15px;
    overflow: hidden;
    cursor: pointer;
    transition: all 0.3s;
    backdrop-filter: blur(10px);
    border: 2px solid rgba(255,255,255,0.1);
}
.card:hover {
    transform: translateY(-10px);
    box-shadow: 0 15px 40px rgba(0,0,0,0.4);
    border-color: rgba(255,255,255,0.3);
}
.card-image { width: 100%; height: 350px; object-fit: cover; background: rgba(0,0,0,0.3); }
.card-content { padding: 15px; }
.card-title { font-size: 1.2rem; font-weight: bold; margin-bottom: 8px; }
.card-genres { font-size: 0.85rem; opacity: 0.8; margin-bottom: 10px; }
.card-type {
    display: inline-block;
    background: rgba(255,255,255,0.2);
    padding: 4px 12px;
    border-radius: 12px;
    font-size: 0.75rem;
    font-weight: 600;
}
.modal {
    display: none;
    position: fixed;
    top: 0;
    left: 0;
    width: 100%;
    height: 100%;
    background: rgba(0,0,0,0.95);
    z-index: 1000;
    padding: 20px;
    overflow-y: auto;
}
.modal.active { display: block; }
.modal-content {
    max-width: 1200px;
    margin: 0 auto;
    background: rgba(255,255,255,0.1);
    border-radius: 20px;
    padding: 30px;
    backdrop-filter: blur(20px);
}
.modal-header { display: flex; justify-content: space-between; align-items: start; margin-bottom: 25px; }
.modal-title { font-size: 2rem; font-weight: bold; }
.close-btn {
    background: rgba(255,0,0,0.8);
    border: none;
    color: white;
    font-size: 1.5rem;
    width: 45px;
    height: 45px;
    border-radius: 50%;
    cursor: pointer;
    transition: all 0.3s;
}
.close-btn:hover { background: rgba(255,0,0,1); transform: scale(1.1); }
.modal-body { display: grid; grid-template-columns: 300px 1fr; gap: 30px; }
.modal-image { width: 100%; border-radius: 15px; box-shadow: 0 10px 30px rgba(0,0,0,0.5); }
.modal-info h3 { margin-bottom: 15px; font-size: 1.3rem; }
.modal-description { line-height: 1.8; margin-bottom: 20px; opacity: 0.9; }
.episodes-list {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(150px, 1fr));
    gap: 10px;
    margin-top: 20px;
}
.episode-btn {
    background: rgba(255,255,255,0.2);
    border: 2px solid rgba(255,255,255,0.3);
    color: white;
    padding: 12px;
    border-radius: 10px;
    cursor: pointer;
    font-weight: 600;
    transition: all 0.3s;
}
.episode-btn:hover { background: rgba(255,255,255,0.3); transform: scale(1.05); }
.video-player { width: 100%; height: 600px; border-radius: 15px; margin-top: 20px; background: #000; }
@media (max-width: 768px) {
    .modal-body { grid-template-columns: 1fr; }
    h1 { font-size: 2rem; }
}
"#;

const LIBRARY_SCRIPT: &str = r#"
let animeData = [];
let moviesData = [];

async function loadData() {
    try {
        const animeRes = await fetch('anime.json');
        animeData = (await animeRes.json()).anime || [];
        const moviesRes = await fetch('movies.json');
        moviesData = (await moviesRes.json()).movies || [];
        render('animeGrid', animeData);
        render('moviesGrid', moviesData);
    } catch (error) {
        console.error('Error loading data:', error);
    }
}

function render(gridId, items) {
    const grid = document.getElementById(gridId);
    grid.innerHTML = items.map((item, i) => `
        <div class="card" data-index="${i}">
            <img src="${item.image || 'https://via.placeholder.com/250x350/667eea/ffffff?text=' + encodeURIComponent(item.name)}"
                 class="card-image" alt="">
            <div class="card-content">
                <div class="card-title"></div>
                <div class="card-genres">${(item.genre || []).join(', ')}</div>
                <span class="card-type">${item.type === 'series' ? '📺 Series' : '🎬 Movie'}</span>
            </div>
        </div>
    `).join('');
    grid.querySelectorAll('.card').forEach((card, i) => {
        card.querySelector('.card-title').textContent = items[i].name;
        card.addEventListener('click', () => openModal(items[i]));
    });
}

function switchTab(tab) {
    document.querySelectorAll('.tab-btn').forEach(btn => btn.classList.remove('active'));
    document.querySelectorAll('.content').forEach(content => content.classList.remove('active'));
    event.target.classList.add('active');
    document.getElementById(tab).classList.add('active');
}

function openModal(item) {
    document.getElementById('modalTitle').textContent = item.name;
    document.getElementById('modalImage').src = item.image || '';
    document.getElementById('modalDescription').textContent = item.description || 'No description available.';

    const episodesSection = document.getElementById('episodesSection');
    const videoSection = document.getElementById('videoSection');

    if (item.type === 'series' && item.episodes) {
        episodesSection.innerHTML = `
            <h3>📺 Episodes</h3>
            <div class="episodes-list">
                ${item.episodes.map(ep => `
                    <button class="episode-btn" data-url="${ep.video_url || ''}">EP ${ep.number}</button>
                `).join('')}
            </div>
        `;
        videoSection.innerHTML = '<iframe id="videoPlayer" class="video-player" allowfullscreen allow="autoplay"></iframe>';
        episodesSection.querySelectorAll('.episode-btn').forEach(btn => {
            btn.addEventListener('click', () => playVideo(btn.dataset.url));
        });
    } else if (item.video_url) {
        episodesSection.innerHTML = '';
        videoSection.innerHTML = '<iframe id="videoPlayer" class="video-player" allowfullscreen allow="autoplay"></iframe>';
        document.getElementById('videoPlayer').src = item.video_url;
    } else {
        episodesSection.innerHTML = '';
        videoSection.innerHTML = '';
    }

    document.getElementById('modal').classList.add('active');
}

function playVideo(url) {
    if (url) document.getElementById('videoPlayer').src = url;
}

function closeModal() {
    document.getElementById('modal').classList.remove('active');
    const player = document.getElementById('videoPlayer');
    if (player) player.src = '';
}

document.addEventListener('keydown', (e) => {
    if (e.key === 'Escape') closeModal();
});

loadData();
"#;
