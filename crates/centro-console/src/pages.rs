//! Static page shells for the browser routes.
//!
//! Three self-contained HTML documents; the call-center shell carries
//! the element ids a front end hydrates from [`crate::CallCenterView`].
//! No templating, no assets, no scripts.

/// GET `/`
pub const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Centro</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 640px; margin: 4rem auto; padding: 0 1rem; color: #111827; }
    a.button { display: inline-block; padding: 0.6rem 1.2rem; background: #2563eb; color: #fff; border-radius: 6px; text-decoration: none; }
    nav a { margin-right: 1rem; color: #2563eb; }
  </style>
</head>
<body>
  <nav><a href="/">Inicio</a><a href="/about">Acerca de</a></nav>
  <h1>Centro</h1>
  <p>Centro de llamadas sobre Twilio Voice: un agente, un navegador, sin hardware telefónico.</p>
  <p><a class="button" href="/screener/calls">Abrir consola de llamadas</a></p>
</body>
</html>
"#;

/// GET `/about`
pub const ABOUT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Acerca de Centro</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 640px; margin: 4rem auto; padding: 0 1rem; color: #111827; }
    nav a { margin-right: 1rem; color: #2563eb; }
  </style>
</head>
<body>
  <nav><a href="/">Inicio</a><a href="/screener/calls">Consola</a></nav>
  <h1>Acerca de Centro</h1>
  <p>Centro emite tokens de acceso para el softphone del agente, responde los
  webhooks de voz de la plataforma con documentos TwiML y modela la sesión del
  agente: registro, una llamada a la vez, silencio, duración e historial.</p>
  <p>El transporte de voz y la señalización pertenecen a la plataforma
  alojada; este servidor no transporta audio.</p>
</body>
</html>
"#;

/// GET `/screener/calls`
pub const CALL_CENTER_PAGE: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Centro de Llamadas</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; color: #111827; }
    header { display: flex; justify-content: space-between; align-items: center; }
    #presence-dot { display: inline-block; width: 10px; height: 10px; border-radius: 50%; background: #6b7280; margin-right: 0.4rem; }
    #status-line { padding: 0.6rem 1rem; background: #f3f4f6; border-radius: 6px; margin: 1rem 0; }
    #stage { font-size: 3rem; font-weight: 700; text-align: center; letter-spacing: 0.2em; margin: 2rem 0 0.5rem; }
    #duration { font-variant-numeric: tabular-nums; text-align: center; font-size: 1.5rem; color: #374151; }
    #controls { display: flex; gap: 0.5rem; justify-content: center; margin: 1.5rem 0; }
    #controls input { flex: 1; max-width: 220px; padding: 0.5rem; }
    #controls button { padding: 0.5rem 1rem; }
    #history li { display: flex; gap: 0.75rem; padding: 0.4rem 0; border-bottom: 1px solid #e5e7eb; }
    #setup-panel { background: #fef3c7; border-radius: 6px; padding: 1rem; }
    #setup-panel code { background: #fde68a; padding: 0 0.25rem; }
  </style>
</head>
<body>
  <header>
    <h1>Centro de Llamadas</h1>
    <div><span id="presence-dot"></span><span id="presence-label">Desconectado</span></div>
  </header>

  <div id="status-line">Iniciando...</div>
  <div id="stage">LOADING</div>
  <div id="duration">00:00</div>

  <div id="controls">
    <input id="dial-input" type="tel" placeholder="+52 55 0000 0000" disabled>
    <button id="dial-button" disabled>Llamar</button>
    <button id="mute-button" disabled>Silenciar</button>
    <button id="hangup-button" disabled>Colgar</button>
  </div>

  <section>
    <h2>Historial de llamadas</h2>
    <ul id="history"><li id="history-empty">No hay llamadas registradas</li></ul>
  </section>

  <section id="setup-panel">
    <h2>Configuración requerida</h2>
    <p>Defina las credenciales de la plataforma antes de iniciar sesión:</p>
    <p><code>TWILIO_ACCOUNT_SID</code>, <code>TWILIO_API_KEY</code>,
    <code>TWILIO_API_SECRET</code>, <code>TWILIO_TWIML_APP_SID</code>,
    <code>TWILIO_PHONE_NUMBER</code></p>
    <p>El endpoint <code>POST /token</code> responde 500 mientras falte alguna.</p>
  </section>
</body>
</html>
"#;
